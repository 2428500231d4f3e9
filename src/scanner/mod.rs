// src/scanner/mod.rs
//! Two-phase verification pipeline
//!
//! The scanner drives the run end to end: load and merge the source
//! lists, resolve pool hostnames into candidate endpoints, probe every
//! candidate, and publish the verified set. The resolve and probe
//! phases each spawn a fixed pool of worker threads over statically
//! pre-partitioned shards and complete fully (all workers joined)
//! before the next phase starts.

/// Pipeline orchestration
///
/// Contains the phase runners, the static shard partitioning, and the
/// run summary returned to the caller.
pub mod pipeline;

// Re-export main components for cleaner imports
pub use pipeline::{ScanSummary, run};
