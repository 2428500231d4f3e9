// src/network/probe.rs
//! Stratum endpoint probing
//!
//! A candidate is probed with a TLS-wrapped attempt first, falling back
//! to plaintext TCP when the TLS attempt fails for any reason or comes
//! back empty. Each attempt connects, sends the fixed JSON-RPC login
//! request, and reads a single newline-terminated response line. Any
//! non-empty line that parses as JSON marks the endpoint as a live
//! Stratum speaker; everything else drops the candidate silently.
//!
//! TLS here is transport only: certificate and hostname verification are
//! disabled, since the scan cares about whether something answers the
//! handshake, not who it claims to be.

use crate::types::{CandidatePair, VerifiedPair};
use serde_json::json;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

/// Wallet-style placeholder credential carried in the login request
const PROBE_LOGIN: &str = "45pwvVJar9j5eqeQ1L2tQnAp8qHSthzJ1MTuvyW6cMJAbGP9DJBD58DGyLimJsLw5N86yoGkEZyFUQzMaUXmpfCuCX8YLdc";

/// Probes candidate endpoints for a Stratum login response
///
/// One `Prober` per worker thread; it owns the shared TLS client
/// configuration and the per-attempt limits.
pub struct Prober {
    timeout: Duration,
    max_response_bytes: usize,
    tls_config: Arc<rustls::ClientConfig>,
}

impl Prober {
    /// Creates a prober with the given per-attempt limits
    ///
    /// # Arguments
    /// * `timeout` - Bound applied to connect, send, and receive of each
    ///   attempt (TLS and plaintext alike)
    /// * `max_response_bytes` - Upper bound on the response line; an
    ///   endpoint streaming more than this without a newline fails the
    ///   probe instead of stalling the worker
    pub fn new(timeout: Duration, max_response_bytes: usize) -> Self {
        Prober {
            timeout,
            max_response_bytes,
            tls_config: insecure_tls_config(),
        }
    }

    /// Classifies one candidate, TLS first, plaintext second
    ///
    /// # Returns
    /// * `Some(VerifiedPair)` - The endpoint answered the login request
    ///   with a non-empty JSON line
    /// * `None` - Both attempts failed or the answer was not JSON
    pub fn probe(&self, pair: &CandidatePair) -> Option<VerifiedPair> {
        let mut answer = self.attempt(pair, true).unwrap_or_default();
        if answer.is_empty() {
            answer = self.attempt(pair, false).unwrap_or_default();
        }

        if is_stratum(&answer) {
            Some((*pair).into())
        } else {
            None
        }
    }

    /// One connection attempt: connect, send login, read one line
    fn attempt(&self, pair: &CandidatePair, tls: bool) -> io::Result<String> {
        let addr = SocketAddr::new(pair.addr, pair.port);
        let stream = TcpStream::connect_timeout(&addr, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        if tls {
            let server_name = rustls::ServerName::try_from(pair.addr.to_string().as_str())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            let conn = rustls::ClientConnection::new(self.tls_config.clone(), server_name)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let mut stream = rustls::StreamOwned::new(conn, stream);
            self.handshake(&mut stream)
        } else {
            let mut stream = stream;
            self.handshake(&mut stream)
        }
    }

    /// Sends the login request and reads the single response line
    fn handshake<S: Read + Write>(&self, stream: &mut S) -> io::Result<String> {
        stream.write_all(login_request().as_bytes())?;
        stream.flush()?;
        read_response_line(stream, self.max_response_bytes)
    }
}

/// Fixed single-line JSON-RPC login request, newline-terminated
///
/// Pools answer the login call even when they reject the credential, and
/// any JSON answer at all is enough to classify the endpoint.
pub fn login_request() -> String {
    let request = json!({
        "id": 1,
        "jsonrpc": "2.0",
        "method": "login",
        "params": { "login": PROBE_LOGIN },
    });
    format!("{}\n", request)
}

/// True when the accumulated response line reads as a Stratum answer
///
/// The check is syntactic only: non-empty and parseable as any JSON
/// value. No schema validation is applied beyond parse success.
pub fn is_stratum(answer: &str) -> bool {
    !answer.is_empty() && serde_json::from_str::<serde_json::Value>(answer).is_ok()
}

/// Accumulates bytes until a newline or connection close
///
/// The newline is not included in the returned line. Exceeding `max`
/// bytes without a newline fails the attempt, as does a response that is
/// not valid UTF-8.
fn read_response_line<S: Read>(stream: &mut S, max: usize) -> io::Result<String> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match stream.read(&mut byte)? {
            0 => break,
            _ => {
                if byte[0] == b'\n' {
                    break;
                }
                line.push(byte[0]);
                if line.len() >= max {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "response line exceeded size limit",
                    ));
                }
            }
        }
    }

    String::from_utf8(line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// TLS client configuration that accepts any certificate
fn insecure_tls_config() -> Arc<rustls::ClientConfig> {
    let config = rustls::ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(NoVerification))
        .with_no_client_auth();
    Arc::new(config)
}

/// Verifier that waves every server certificate through
struct NoVerification;

impl rustls::client::ServerCertVerifier for NoVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::Certificate,
        _intermediates: &[rustls::Certificate],
        _server_name: &rustls::ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: std::time::SystemTime,
    ) -> Result<rustls::client::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::ServerCertVerified::assertion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::net::{IpAddr, Ipv4Addr, TcpListener};
    use std::thread;
    use std::time::Instant;

    /// Accepts a handful of connections, consuming whatever the client
    /// sends and answering each with the fixed reply.
    fn spawn_responder(reply: &'static [u8]) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for _ in 0..4 {
                if let Ok((mut stream, _)) = listener.accept() {
                    let mut buf = [0u8; 2048];
                    let _ = stream.read(&mut buf);
                    let _ = stream.write_all(reply);
                }
            }
        });
        addr
    }

    fn candidate(addr: SocketAddr) -> CandidatePair {
        CandidatePair {
            addr: addr.ip(),
            port: addr.port(),
        }
    }

    #[test]
    fn test_is_stratum_accepts_any_json_value() {
        assert!(is_stratum("{\"result\":true}"));
        assert!(is_stratum("[1,2,3]"));
        assert!(is_stratum("42"));
        assert!(!is_stratum("not json"));
        assert!(!is_stratum(""));
    }

    #[test]
    fn test_login_request_shape() {
        let request = login_request();
        assert!(request.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(request.trim_end()).unwrap();
        assert_eq!(parsed["method"], "login");
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["params"]["login"], PROBE_LOGIN);
    }

    #[test]
    fn test_read_response_line_stops_at_newline() {
        let mut cursor = Cursor::new(b"{\"result\":true}\ntrailing".to_vec());
        let line = read_response_line(&mut cursor, 1024).unwrap();
        assert_eq!(line, "{\"result\":true}");
    }

    #[test]
    fn test_read_response_line_accepts_eof_termination() {
        let mut cursor = Cursor::new(b"{\"result\":true}".to_vec());
        let line = read_response_line(&mut cursor, 1024).unwrap();
        assert_eq!(line, "{\"result\":true}");
    }

    #[test]
    fn test_read_response_line_enforces_limit() {
        let mut cursor = Cursor::new(vec![b'x'; 4096]);
        assert!(read_response_line(&mut cursor, 128).is_err());
    }

    #[test]
    fn test_probe_verifies_json_responder() {
        // The responder speaks no TLS, so the first attempt collapses and
        // the plaintext fallback carries the handshake.
        let addr = spawn_responder(b"{\"id\":1,\"result\":{\"status\":\"OK\"}}\n");
        let prober = Prober::new(Duration::from_secs(2), 64 * 1024);

        let verified = prober.probe(&candidate(addr));
        assert_eq!(
            verified,
            Some(VerifiedPair {
                addr: addr.ip(),
                port: addr.port(),
            })
        );
    }

    #[test]
    fn test_probe_rejects_non_json_responder() {
        let addr = spawn_responder(b"not json\n");
        let prober = Prober::new(Duration::from_secs(2), 64 * 1024);

        assert_eq!(prober.probe(&candidate(addr)), None);
    }

    #[test]
    fn test_probe_rejects_refused_connection() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let prober = Prober::new(Duration::from_millis(500), 64 * 1024);
        assert_eq!(prober.probe(&candidate(addr)), None);
    }

    #[test]
    fn test_probe_timeout_is_bounded() {
        // Accepts but never answers; both attempts must give up within
        // the configured timeout instead of hanging the worker.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let mut held = Vec::new();
            for _ in 0..4 {
                if let Ok((stream, _)) = listener.accept() {
                    held.push(stream);
                }
            }
        });

        let prober = Prober::new(Duration::from_millis(300), 64 * 1024);
        let start = Instant::now();
        let verified = prober.probe(&CandidatePair {
            addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: addr.port(),
        });

        assert_eq!(verified, None);
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
