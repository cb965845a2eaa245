//! Runtime channel error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the runtime channel.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No runtime endpoint was configured.
    #[error("No runtime socket configured")]
    NoEndpoints,

    /// The runtime socket could not be reached.
    #[error("Cannot connect to runtime socket {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sending a command or reading its response failed.
    #[error("Runtime I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The proxy answered with an error message.
    #[error("Runtime command `{command}` failed: {response}")]
    Command { command: String, response: String },

    #[error("Invalid server state: {0}")]
    InvalidState(String),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
