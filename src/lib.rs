//! Class Roster - per-class instructor rosters from a booking export
//!
//! This library reads a booking export (.xlsx), groups registrants into
//! classes by location, course category and start time, renders one styled
//! roster spreadsheet per class and packages them into a zip archive.
//!
//! # Example
//!
//! ```no_run
//! use class_roster::config::RosterConfig;
//! use class_roster::pipeline;
//!
//! let config = RosterConfig::default();
//! let input = std::fs::read("export.xlsx")?;
//! let outcome = pipeline::generate(&input, &config)?;
//!
//! println!("Rosters: {}", outcome.archive.entries.len());
//! std::fs::write("Rosters.zip", &outcome.archive.bytes)?;
//! # Ok::<(), class_roster::error::RosterError>(())
//! ```

pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod extract;
pub mod grouper;
pub mod naming;
pub mod pipeline;
pub mod roster;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use config::RosterConfig;
pub use error::{RosterError, RosterResult};
pub use types::{Group, GroupKey, InputRow, RosterDocument};
