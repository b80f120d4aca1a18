//! Roster API Server module
//!
//! Thin HTTP adapter over the pipeline: upload a booking export,
//! download the roster archive. Run with `roster-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
