use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the optional config file looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "webownr.toml";

/// Name of the SQLite database file inside the data directory.
pub const DB_FILE_NAME: &str = "webownr.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Apex domain tenants are served under (e.g. "webownr.com" serves
    /// "acme.webownr.com"). Hosts outside it are passed through untouched.
    pub root_domain: String,
    /// Template rendered when a site's stored template id is missing or unknown.
    pub default_template: String,
    /// Upper bound on a single site lookup before it is treated as not found.
    pub store_timeout_ms: u64,
}

impl ServerConfig {
    /// Loads `webownr.toml` from `data_dir` if present, otherwise defaults.
    /// The data directory argument always wins over a `data_dir` in the file.
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let path = data_dir.join(CONFIG_FILE_NAME);

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.data_dir = data_dir;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            root_domain: "webownr.com".to_string(),
            default_template: "modern".to_string(),
            store_timeout_ms: 2000,
        }
    }
}
