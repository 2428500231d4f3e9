// src/types.rs
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

/// A hostname together with every port configured for it across all
/// source lists.
///
/// Entries are produced by the pool table builder before DNS resolution.
/// Ports are kept as the raw strings found in the lists; they are parsed
/// into numeric ports only when candidates are expanded, so a bad port
/// in one list cannot poison the rest of the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    /// Hostname as it appeared in the source list (may carry a
    /// `/location` suffix that is stripped before resolution)
    pub host: String,
    /// Configured ports, in list order, duplicates tolerated
    pub ports: Vec<String>,
}

/// Accumulated `hostname -> ports` table built from the source lists
///
/// Hostname keys are unique; repeated lines for the same hostname merge
/// their ports. Merging is associative and commutative, so feeding the
/// same lines in any order yields the same table by content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolTable {
    entries: HashMap<String, Vec<String>>,
}

impl PoolTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single port to a hostname's port list
    pub fn add_port(&mut self, host: &str, port: String) {
        self.entries.entry(host.to_string()).or_default().push(port);
    }

    /// Adds several ports to a hostname's port list
    pub fn add_ports(&mut self, host: &str, ports: Vec<String>) {
        self.entries
            .entry(host.to_string())
            .or_default()
            .extend(ports);
    }

    /// Number of distinct hostnames in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no hostname has been added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the table into a flat list of pool entries
    pub fn into_entries(self) -> Vec<PoolEntry> {
        self.entries
            .into_iter()
            .map(|(host, ports)| PoolEntry { host, ports })
            .collect()
    }
}

/// A resolved address paired with one configured port, awaiting a probe
///
/// The address is always an IP literal produced by resolution, never a
/// hostname. Candidates exist only between the resolve and probe phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    /// Resolved IPv4 or IPv6 address
    pub addr: IpAddr,
    /// Port to probe
    pub port: u16,
}

/// A candidate that answered the login handshake with well-formed JSON
///
/// Serialized into the output file as `"<address> <port>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedPair {
    /// Address that responded
    pub addr: IpAddr,
    /// Port that responded
    pub port: u16,
}

impl From<CandidatePair> for VerifiedPair {
    fn from(pair: CandidatePair) -> Self {
        VerifiedPair {
            addr: pair.addr,
            port: pair.port,
        }
    }
}

impl fmt::Display for VerifiedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.addr, self.port)
    }
}
