// src/cli/mod.rs
//! Command-line interface definitions
//!
//! Declares the clap command tree for the scanner binary.

/// Command and option declarations
pub mod commands;

// Re-export for easier access
pub use commands::{Action, Commands, ConfigOptions, ScanOptions};
