// src/report/publisher.rs
use crate::types::VerifiedPair;
use crate::utils::error::ScoutError;
use std::fs;
use std::path::Path;

/// What the publisher did with the verified set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Bytes written to the staging file
    pub written_bytes: usize,
    /// True when the staged file was promoted over the output path
    pub published: bool,
}

/// Serializes the verified set and promotes it atomically
///
/// Pairs are written as `"<address> <port>"` lines joined with newlines
/// and no trailing newline, first to `staging`, which is then renamed
/// over `output` only when a non-zero byte count was written. An empty
/// result therefore never clobbers a previous good output file; the
/// stale list stays in place until a run produces something better.
///
/// # Arguments
/// * `verified` - Verified pairs in any order
/// * `staging` - Temporary path the result is written to first
/// * `output` - Final path of the published list
///
/// # Errors
/// Returns `ScoutError` when the staging write or the rename fails.
pub fn publish(
    verified: &[VerifiedPair],
    staging: &Path,
    output: &Path,
) -> Result<PublishOutcome, ScoutError> {
    let body = verified
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    fs::write(staging, &body)?;
    let written_bytes = body.len();

    if written_bytes > 0 {
        fs::rename(staging, output)?;
        log::info!(
            "Published {} verified endpoints ({} bytes) to {}",
            verified.len(),
            written_bytes,
            output.display()
        );
        Ok(PublishOutcome {
            written_bytes,
            published: true,
        })
    } else {
        log::warn!(
            "No verified endpoints this run; keeping previous output at {}",
            output.display()
        );
        Ok(PublishOutcome {
            written_bytes: 0,
            published: false,
        })
    }
}
