// src/network/mod.rs
//! Network components of the verification pipeline
//!
//! This module holds everything that touches the wire:
//! - `resolver`: per-family DNS lookups turning pool hostnames into
//!   candidate endpoints
//! - `probe`: TLS-then-plaintext connection attempts with the Stratum
//!   login handshake used to classify an endpoint as live
//!
//! Every fallible operation in here degrades to "no result for this
//! unit". Nothing in this module can abort a phase or the run.

/// Hostname resolution
///
/// Resolves A and AAAA records independently and expands the results
/// into candidate (address, port) pairs.
pub mod resolver;

/// Endpoint probing
///
/// Connects to candidates, performs the login handshake, and classifies
/// the response line.
pub mod probe;

// Re-export main components for cleaner imports
pub use probe::{Prober, is_stratum, login_request};
pub use resolver::{HostResolver, expand_candidates, strip_location_suffix};
