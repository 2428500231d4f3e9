// src/report/mod.rs
//! Result publication
//!
//! The verified endpoint set is written once, at the end of the run,
//! through a stage-then-rename pattern: the previous output file is
//! replaced only when the new result actually contains something.

/// Stage-and-promote result writer
///
/// Contains [`publish`] and the [`PublishOutcome`] it reports back to
/// the pipeline.
pub mod publisher;

// Re-export main components for cleaner imports
pub use publisher::{PublishOutcome, publish};
