// src/config/config.rs
use crate::utils::error::ScoutError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the scanner
///
/// Contains all settings needed to run a verification pass over the
/// configured source lists: which lists to read, how many worker threads
/// each phase spawns, the per-attempt network timeout, and where the
/// verified endpoints are staged and published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Paths of the line-oriented source lists to load
    pub source_lists: Vec<PathBuf>,

    /// Number of worker threads per phase (0 = number of CPU cores)
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Per-attempt connect/read/write timeout in seconds
    /// (default: 5)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on a single probe response line, in bytes
    /// (default: 65536)
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,

    /// Path the result file is staged to before publication
    #[serde(default = "default_staging_path")]
    pub staging_path: PathBuf,

    /// Final path of the verified endpoint list
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_worker_threads() -> usize {
    20
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_max_response_bytes() -> usize {
    64 * 1024
}

fn default_staging_path() -> PathBuf {
    PathBuf::from("verified_miners_tmp.txt")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("verified_miners.txt")
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(ScoutError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScoutError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            ScoutError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_str)
            .map_err(|e| ScoutError::ConfigError(format!("Invalid config format: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that serde defaults alone cannot express
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ScoutError)` - No source lists, or degenerate limits
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.source_lists.is_empty() {
            return Err(ScoutError::ConfigError(
                "At least one source list is required".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ScoutError::ConfigError(
                "max_response_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective worker count, resolving the `0 = auto` convention
    pub fn effective_workers(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }

    /// Per-attempt network timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Generates a configuration template string
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# Stratum Scout Configuration\n\n");
        template.push_str("# Line-oriented blacklist feeds, one entry per line\n");
        template.push_str("source_lists = [\"blacklists/list_cato.txt\", \"blacklists/list_custom.txt\"]\n\n");
        template.push_str("# Worker threads per phase (0 = auto-detect)\n");
        template.push_str("worker_threads = 20\n");
        template.push_str("# Per-attempt connect/read timeout in seconds\n");
        template.push_str("connect_timeout_secs = 5\n");
        template.push_str("# Upper bound on a single probe response line\n");
        template.push_str("max_response_bytes = 65536\n\n");
        template.push_str("# Result staging and publication paths\n");
        template.push_str("staging_path = \"verified_miners_tmp.txt\"\n");
        template.push_str("output_path = \"verified_miners.txt\"\n");

        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_lists = [\"lists/feed.txt\"]").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.worker_threads, 20);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.max_response_bytes, 64 * 1024);
        assert_eq!(config.output_path, PathBuf::from("verified_miners.txt"));
    }

    #[test]
    fn test_load_rejects_empty_source_lists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_lists = []").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_template_round_trips() {
        let config: Config = toml::from_str(&Config::generate_template()).unwrap();
        assert_eq!(config.source_lists.len(), 2);
        assert_eq!(config.worker_threads, 20);
    }

    #[test]
    fn test_zero_workers_resolves_to_cpu_count() {
        let config: Config = toml::from_str(
            "source_lists = [\"feed.txt\"]\nworker_threads = 0\n",
        )
        .unwrap();
        assert!(config.effective_workers() >= 1);
    }
}
