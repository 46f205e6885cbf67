//! Configuration for diskkv
//!
//! Centralized configuration with sensible defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{KvError, Result};

/// Environment variable overriding the storage directory
pub const STORAGE_DIR_ENV: &str = "DISKKV_STORAGE_DIR";

/// Environment variable holding the HTTP port
pub const PORT_ENV: &str = "PORT";

/// Host the server binds unless `--listen` names another
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Main configuration for a diskkv instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the data file
    /// Internal structure:
    ///   {storage_dir}/
    ///     └── data.json        (base64url-encoded JSON object)
    pub storage_dir: PathBuf,

    /// Which store implementation to serve
    pub backend: Backend,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    ///
    /// Always all interfaces (`0.0.0.0`) unless set explicitly; `PORT` only
    /// changes the port. Default `0.0.0.0:8080`.
    pub listen_addr: String,
}

/// Store implementation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Durable store, one JSON file rewritten on every mutation
    #[default]
    File,

    /// Process-local map, lost on exit
    Memory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: std::env::temp_dir(),
            backend: Backend::File,
            listen_addr: listen_addr_for_port(DEFAULT_PORT),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from `DISKKV_STORAGE_DIR` and `PORT`, falling back to defaults
    pub fn from_env() -> Self {
        let mut builder = Self::builder();

        if let Some(dir) = std::env::var_os(STORAGE_DIR_ENV).filter(|d| !d.is_empty()) {
            builder = builder.storage_dir(dir);
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            if !port.is_empty() {
                builder = builder.listen_addr(listen_addr_for_port(port));
            }
        }

        builder.build()
    }

    /// Parse the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr.parse().map_err(|e| {
            KvError::Config(format!("invalid listen address {:?}: {}", self.listen_addr, e))
        })
    }
}

fn listen_addr_for_port(port: impl std::fmt::Display) -> String {
    format!("{}:{}", DEFAULT_HOST, port)
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage directory
    pub fn storage_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_dir = path.into();
        self
    }

    /// Select the store implementation
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
