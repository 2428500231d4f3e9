// src/sources/table.rs
//! Line grammar classification and pool table merging
//!
//! Feeds mix three entry shapes. Classification is an explicit tagged
//! result rather than ad-hoc matching so each shape stays testable in
//! isolation and the merge step is a plain exhaustive match.

use crate::types::PoolTable;

/// Classification of one source list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Literal `ddd.ddd.ddd.ddd:port` endpoint
    ///
    /// Discarded without resolution or probing. The upstream feeds mix a
    /// few literal addresses into otherwise hostname-based lists and the
    /// scanner has always skipped them; the skip is kept as documented
    /// behavior rather than silently turning literals into candidates.
    LiteralEndpoint,

    /// `host:port`, one hostname with a single port
    HostPort {
        /// Hostname part, before the final colon
        host: String,
        /// Digit-only port string
        port: String,
    },

    /// `host,port1,port2,...`, one hostname with several ports
    HostMultiPort {
        /// Hostname part, before the first comma
        host: String,
        /// Digit-only port strings, in list order
        ports: Vec<String>,
    },

    /// Line matches none of the accepted grammars; silently skipped
    Ignored,
}

/// Classifies a single trimmed line against the three accepted grammars
///
/// Shapes are checked in the order the historical feeds relied on:
/// literal endpoint first, then `host:port`, then `host,port,...`.
/// A `host:port` line therefore wins over the multi-port shape when a
/// line could be read as either.
pub fn classify_line(line: &str) -> LineKind {
    if is_literal_endpoint(line) {
        return LineKind::LiteralEndpoint;
    }

    if let Some((host, port)) = line.rsplit_once(':') {
        if has_host_prefix(host) && is_digits(port) {
            return LineKind::HostPort {
                host: host.to_string(),
                port: port.to_string(),
            };
        }
    }

    let mut parts = line.split(',');
    if let Some(host) = parts.next() {
        let ports: Vec<&str> = parts.collect();
        if has_host_prefix(host) && !ports.is_empty() && ports.iter().all(|p| is_digits(p)) {
            return LineKind::HostMultiPort {
                host: host.to_string(),
                ports: ports.iter().map(|p| p.to_string()).collect(),
            };
        }
    }

    LineKind::Ignored
}

/// Merges one loaded feed into the accumulated pool table
///
/// Literal endpoints and unrecognized lines contribute nothing; the two
/// hostname shapes append their ports under the hostname key. Merging is
/// associative and commutative, so feed order never changes the table
/// content.
pub fn merge_list(table: &mut PoolTable, lines: &[String]) {
    for line in lines {
        match classify_line(line) {
            LineKind::HostPort { host, port } => table.add_port(&host, port),
            LineKind::HostMultiPort { host, ports } => table.add_ports(&host, ports),
            LineKind::LiteralEndpoint | LineKind::Ignored => {}
        }
    }
}

/// Shape check for `ddd.ddd.ddd.ddd:port`
///
/// Matches on digit-group shape, not on address validity: `999.1.1.1:80`
/// is a literal endpoint here exactly as it was to the historical regex.
fn is_literal_endpoint(line: &str) -> bool {
    let Some((addr, port)) = line.split_once(':') else {
        return false;
    };
    if !is_digits(port) {
        return false;
    }

    let octets: Vec<&str> = addr.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| is_digits(o))
}

/// Hostname shapes must begin with an ASCII alphanumeric or a dot
fn has_host_prefix(host: &str) -> bool {
    host.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.')
}

/// Non-empty, ASCII digits only
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
