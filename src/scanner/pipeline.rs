// src/scanner/pipeline.rs
//! Pipeline orchestration
//!
//! Work partitioning is static: each phase splits its input into N
//! near-equal shards up front and spawns one worker thread per shard.
//! There is no rebalancing between workers: a shard whose hostnames
//! resolve to many addresses can run long while its siblings sit idle,
//! which is an accepted trade for keeping the phases simple. The only
//! shared mutable state per phase is the channel collecting results;
//! nothing reads from it until every worker has been joined.

use crate::config::Config;
use crate::network::probe::Prober;
use crate::network::resolver::HostResolver;
use crate::report::publisher;
use crate::sources::{loader, table};
use crate::types::{CandidatePair, PoolEntry, PoolTable, VerifiedPair};
use crate::utils::error::ScoutError;
use crossbeam_channel::unbounded;
use rand::seq::SliceRandom;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Final counts for one verification run
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Distinct hostnames merged from all source lists
    pub pool_count: usize,
    /// Candidate (address, port) pairs produced by resolution
    pub candidate_count: usize,
    /// Candidates that answered the login handshake with JSON
    pub verified_count: usize,
    /// Bytes written to the staging file
    pub written_bytes: usize,
    /// Whether the staged result was promoted to the output path
    pub published: bool,
    /// Wall-clock duration of the resolve and probe phases
    pub elapsed: Duration,
}

/// Runs the full pipeline: load, resolve, probe, publish
///
/// # Arguments
/// * `config` - Scan configuration (source lists, worker count, limits,
///   output paths)
///
/// # Errors
/// Returns `ScoutError` only for run-level failures: an unreadable
/// source list, or an I/O failure while staging/publishing the result.
/// Network-level failures never surface here; they degrade inside the
/// workers that hit them.
pub fn run(config: &Config) -> Result<ScanSummary, ScoutError> {
    let mut pools = PoolTable::new();
    for path in &config.source_lists {
        let lines = loader::load_source_list(path)?;
        log::info!("Loaded {} lines from {}", lines.len(), path.display());
        table::merge_list(&mut pools, &lines);
    }

    let entries = pools.into_entries();
    let pool_count = entries.len();
    let workers = config.effective_workers();
    let started = Instant::now();

    log::info!("Resolving {} pool hosts on {} workers", pool_count, workers);
    let mut candidates = resolve_phase(entries, workers);

    // Random probe order keeps addresses of the same pool from being
    // hit in a short window.
    candidates.shuffle(&mut rand::thread_rng());
    let candidate_count = candidates.len();

    log::info!(
        "Probing {} candidate endpoints on {} workers",
        candidate_count,
        workers
    );
    let verified = probe_phase(
        candidates,
        workers,
        config.connect_timeout(),
        config.max_response_bytes,
    );
    let elapsed = started.elapsed();

    let outcome = publisher::publish(&verified, &config.staging_path, &config.output_path)?;

    Ok(ScanSummary {
        pool_count,
        candidate_count,
        verified_count: verified.len(),
        written_bytes: outcome.written_bytes,
        published: outcome.published,
        elapsed,
    })
}

/// Resolve phase: pool entries in, candidate pairs out
///
/// Spawns one worker per shard; each worker owns a resolver and walks
/// its shard serially. The phase returns only after every worker has
/// been joined.
pub fn resolve_phase(entries: Vec<PoolEntry>, workers: usize) -> Vec<CandidatePair> {
    let (tx, rx) = unbounded();

    let handles: Vec<_> = split_into_shards(entries, workers)
        .into_iter()
        .map(|shard| {
            let tx = tx.clone();
            thread::spawn(move || {
                let Some(resolver) = HostResolver::new() else {
                    return;
                };
                for entry in shard {
                    for pair in resolver.resolve_entry(&entry) {
                        let _ = tx.send(pair);
                    }
                }
            })
        })
        .collect();

    drop(tx);
    join_workers(handles, "resolve");
    rx.try_iter().collect()
}

/// Probe phase: shuffled candidates in, verified pairs out
///
/// Mirrors the resolve phase partitioning; each worker owns one prober
/// and the phase barrier is the join loop.
pub fn probe_phase(
    candidates: Vec<CandidatePair>,
    workers: usize,
    timeout: Duration,
    max_response_bytes: usize,
) -> Vec<VerifiedPair> {
    let (tx, rx) = unbounded();

    let handles: Vec<_> = split_into_shards(candidates, workers)
        .into_iter()
        .map(|shard| {
            let tx = tx.clone();
            thread::spawn(move || {
                let prober = Prober::new(timeout, max_response_bytes);
                for pair in shard {
                    if let Some(verified) = prober.probe(&pair) {
                        let _ = tx.send(verified);
                    }
                }
            })
        })
        .collect();

    drop(tx);
    join_workers(handles, "probe");
    rx.try_iter().collect()
}

/// Splits `items` into `shard_count` near-equal shards
///
/// Sizes differ by at most one; shards beyond the item count come back
/// empty so every phase spawns its full worker complement regardless of
/// input size.
fn split_into_shards<T>(mut items: Vec<T>, shard_count: usize) -> Vec<Vec<T>> {
    let shard_count = shard_count.max(1);
    let base = items.len() / shard_count;
    let extra = items.len() % shard_count;

    let mut shards = Vec::with_capacity(shard_count);
    for i in 0..shard_count {
        let take = base + usize::from(i < extra);
        let rest = items.split_off(take);
        shards.push(items);
        items = rest;
    }
    shards
}

/// Phase barrier: joins every worker before results are drained
fn join_workers(handles: Vec<JoinHandle<()>>, phase: &str) {
    for handle in handles {
        if handle.join().is_err() {
            log::warn!("A {} worker panicked; its shard is incomplete", phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn test_shards_are_near_equal() {
        let shards = split_into_shards((0..7).collect::<Vec<_>>(), 3);
        let sizes: Vec<usize> = shards.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);

        let flattened: Vec<i32> = shards.into_iter().flatten().collect();
        assert_eq!(flattened, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_more_shards_than_items_pads_with_empties() {
        let shards = split_into_shards(vec![1, 2], 5);
        assert_eq!(shards.len(), 5);
        assert_eq!(shards.iter().filter(|s| s.is_empty()).count(), 3);
    }

    #[test]
    fn test_zero_shard_count_is_clamped() {
        let shards = split_into_shards(vec![1, 2, 3], 0);
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0], vec![1, 2, 3]);
    }

    #[test]
    fn test_probe_phase_keeps_only_live_endpoints() {
        // One endpoint answering JSON, one refused port.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let live = listener.local_addr().unwrap();
        thread::spawn(move || {
            for _ in 0..4 {
                if let Ok((mut stream, _)) = listener.accept() {
                    let mut buf = [0u8; 2048];
                    let _ = stream.read(&mut buf);
                    let _ = stream.write_all(b"{\"id\":1,\"result\":{\"status\":\"OK\"}}\n");
                }
            }
        });

        let refused = TcpListener::bind("127.0.0.1:0").unwrap();
        let dead = refused.local_addr().unwrap();
        drop(refused);

        let candidates = vec![
            CandidatePair {
                addr: live.ip(),
                port: live.port(),
            },
            CandidatePair {
                addr: dead.ip(),
                port: dead.port(),
            },
        ];

        let verified = probe_phase(candidates, 2, Duration::from_millis(500), 64 * 1024);
        assert_eq!(
            verified,
            vec![VerifiedPair {
                addr: live.ip(),
                port: live.port(),
            }]
        );
    }
}
