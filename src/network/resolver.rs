// src/network/resolver.rs
//! DNS resolution for pool hostnames
//!
//! Each worker owns its own [`HostResolver`]. A and AAAA records are
//! looked up independently so one broken family only costs that family's
//! addresses. Any resolution error at all (NXDOMAIN, timeout, malformed
//! name, resolver fault) yields zero addresses for that lookup and
//! nothing else.

use crate::types::{CandidatePair, PoolEntry};
use std::net::IpAddr;
use trust_dns_resolver::Resolver;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};

/// Blocking per-family DNS resolver for one worker thread
pub struct HostResolver {
    inner: Resolver,
}

impl HostResolver {
    /// Creates a resolver with the default upstream configuration
    ///
    /// Returns `None` when the resolver library fails to initialize; the
    /// owning worker then contributes zero candidates, which is the same
    /// degradation every individual lookup failure gets.
    pub fn new() -> Option<Self> {
        match Resolver::new(ResolverConfig::default(), ResolverOpts::default()) {
            Ok(inner) => Some(HostResolver { inner }),
            Err(e) => {
                log::warn!("DNS resolver initialization failed: {}", e);
                None
            }
        }
    }

    /// Resolves a pool entry into its candidate pairs
    ///
    /// Strips any `/location` suffix, resolves both address families, and
    /// pairs every resolved address with every configured port.
    pub fn resolve_entry(&self, entry: &PoolEntry) -> Vec<CandidatePair> {
        let addrs = self.resolve_host(&entry.host);
        expand_candidates(&addrs, &entry.ports)
    }

    /// Resolves both address families for one hostname
    pub fn resolve_host(&self, host: &str) -> Vec<IpAddr> {
        let name = strip_location_suffix(host);
        let mut addrs = self.lookup_v4(name);
        addrs.extend(self.lookup_v6(name));
        addrs
    }

    /// A-record lookup; any failure yields an empty set
    fn lookup_v4(&self, name: &str) -> Vec<IpAddr> {
        match self.inner.ipv4_lookup(name) {
            Ok(lookup) => lookup.iter().map(|a| IpAddr::V4(a.0)).collect(),
            Err(e) => {
                log::debug!("A lookup for {} failed: {}", name, e);
                Vec::new()
            }
        }
    }

    /// AAAA-record lookup; any failure yields an empty set
    fn lookup_v6(&self, name: &str) -> Vec<IpAddr> {
        match self.inner.ipv6_lookup(name) {
            Ok(lookup) => lookup.iter().map(|aaaa| IpAddr::V6(aaaa.0)).collect(),
            Err(e) => {
                log::debug!("AAAA lookup for {} failed: {}", name, e);
                Vec::new()
            }
        }
    }
}

/// Drops a path-like suffix from a pool identifier before resolution
///
/// Some feeds qualify endpoints with a location or channel after a
/// slash (`v2.us-east.pool.example/abc123`); only the part before the
/// slash is a resolvable name.
pub fn strip_location_suffix(host: &str) -> &str {
    match host.find('/') {
        Some(idx) => &host[..idx],
        None => host,
    }
}

/// Cartesian product of resolved addresses and configured ports
///
/// Port strings that do not parse as a TCP port contribute nothing;
/// the remaining ports still expand normally.
pub fn expand_candidates(addrs: &[IpAddr], ports: &[String]) -> Vec<CandidatePair> {
    let mut pairs = Vec::with_capacity(addrs.len() * ports.len());
    for addr in addrs {
        for port in ports {
            match port.parse::<u16>() {
                Ok(port) => pairs.push(CandidatePair { addr: *addr, port }),
                Err(_) => log::debug!("Skipping unparseable port {:?}", port),
            }
        }
    }
    pairs
}
