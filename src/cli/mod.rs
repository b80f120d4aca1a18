//! CLI command handlers

pub mod commands;

pub use commands::{config, generate, groups, inspect, GenerateOptions};
