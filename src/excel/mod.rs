//! Excel import/export
//!
//! - Import: booking export (.xlsx) → input rows
//! - Export: roster document → styled .xlsx bytes
//! - Template: informational block shared by every roster
//! - Reader: generated roster → plain cells, for checks and inspection

pub mod exporter;
pub mod importer;
pub mod reader;
pub mod template;

pub use exporter::RosterExporter;
pub use importer::BookingImporter;
pub use reader::{read_roster, RosterTable};
pub use template::InfoBlock;
