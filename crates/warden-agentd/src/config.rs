use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

/// Catalog root: directory containing one subdirectory per managed instance.
pub const ENV_SERVERS_DIR: &str = "WARDEN_SERVERS_DIR";
/// Base directory for per-instance timefiles (distinct from the catalog root).
pub const ENV_STATE_DIR: &str = "WARDEN_STATE_DIR";
/// Socket address the HTTP API binds to.
pub const ENV_LISTEN_ADDR: &str = "WARDEN_LISTEN_ADDR";
/// Comma-separated directory names hidden from catalog listings.
pub const ENV_EXCLUDE: &str = "WARDEN_EXCLUDE";
/// Log level filter expression.
pub const ENV_LOG_LEVEL: &str = "WARDEN_LOG_LEVEL";
/// Log output format (text|json).
pub const ENV_LOG_FORMAT: &str = "WARDEN_LOG_FORMAT";

const DEFAULT_STATE_DIR: &str = "/data";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Process configuration, read once from the environment at startup.
///
/// There is no process-wide mutable state: the values collected here are
/// passed into each component at construction.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub servers_dir: PathBuf,
    pub state_dir: PathBuf,
    pub listen_addr: SocketAddr,
    pub exclusions: Vec<String>,
    pub log_level: String,
    pub log_format: String,
}

impl AgentConfig {
    /// Read the configuration from environment variables.
    ///
    /// Only `WARDEN_SERVERS_DIR` is required; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let servers_dir = std::env::var(ENV_SERVERS_DIR)
            .with_context(|| format!("{ENV_SERVERS_DIR} is not set"))?;

        let listen_addr = env_or(ENV_LISTEN_ADDR, DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_addr
            .parse()
            .with_context(|| format!("{ENV_LISTEN_ADDR}: invalid socket address '{listen_addr}'"))?;

        Ok(Self {
            servers_dir: PathBuf::from(servers_dir),
            state_dir: PathBuf::from(env_or(ENV_STATE_DIR, DEFAULT_STATE_DIR)),
            listen_addr,
            exclusions: parse_exclusions(&env_or(ENV_EXCLUDE, "")),
            log_level: env_or(ENV_LOG_LEVEL, "info"),
            log_format: env_or(ENV_LOG_FORMAT, "text"),
        })
    }

    /// Fatal startup check: the catalog root must already exist.
    ///
    /// A missing or non-directory root is a configuration error, not a
    /// runtime one; the process refuses to start.
    pub fn ensure_catalog_root(&self) -> anyhow::Result<()> {
        if !self.servers_dir.is_dir() {
            bail!(
                "{ENV_SERVERS_DIR}: ({}) doesn't exist or is not a directory",
                self.servers_dir.display()
            );
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_exclusions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
