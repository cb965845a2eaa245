//! Client parameter definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::StoreParams;

/// Everything needed to construct a [`Client`](crate::Client).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientParams {
    /// Staging area for transaction candidates; store default when absent.
    #[serde(default)]
    pub transaction_dir: Option<PathBuf>,

    /// Configuration document managed by the store.
    pub config_file: PathBuf,

    /// Checker run as `<program> -c -f <candidate>` on every commit.
    ///
    /// Candidates are TOML documents, so a stock proxy binary rejects them;
    /// point this at a checker or wrapper that understands that format.
    pub program: PathBuf,

    /// Runtime API socket of the running proxy.
    pub runtime_socket: PathBuf,

    /// Per-command socket I/O deadline in milliseconds.
    #[serde(default)]
    pub runtime_timeout_ms: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientParams {
    pub fn new(
        config_file: impl Into<PathBuf>,
        program: impl Into<PathBuf>,
        runtime_socket: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transaction_dir: None,
            config_file: config_file.into(),
            program: program.into(),
            runtime_socket: runtime_socket.into(),
            runtime_timeout_ms: None,
            logging: LoggingConfig::default(),
        }
    }

    pub fn runtime_timeout(&self) -> Option<Duration> {
        self.runtime_timeout_ms.map(Duration::from_millis)
    }

    pub fn store_params(&self) -> StoreParams {
        StoreParams {
            config_file: self.config_file.clone(),
            transaction_dir: self.transaction_dir.clone(),
            program: self.program.clone(),
        }
    }
}

/// Logging settings for programs that let the client set up tracing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "proxy_config_client=info".to_string(),
            json: false,
        }
    }
}
