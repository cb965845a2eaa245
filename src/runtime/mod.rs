//! Runtime control of the live proxy process.
//!
//! # Data Flow
//! ```text
//! RuntimeControl facade
//!     → RuntimeChannel (immediate, no staging, no transaction)
//!     → socket.rs: one connection per command per endpoint
//!     → running proxy applies the change at once
//! ```
//!
//! # Design Decisions
//! - Runtime commands never touch the configuration store or transaction state
//! - Changes made here are lost on the next reload unless also committed
//! - No retry, no queuing: errors are returned to the caller as-is

pub mod error;
pub mod socket;

pub use error::{RuntimeError, RuntimeResult};
pub use socket::SocketChannel;

use std::fmt;
use std::str::FromStr;

/// Administrative state of a server in the running proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerState {
    /// Fully enabled.
    Ready,
    /// No new connections; existing ones finish.
    Drain,
    /// Maintenance: no traffic at all.
    Maint,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerState::Ready => "ready",
            ServerState::Drain => "drain",
            ServerState::Maint => "maint",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerState {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ready" | "up" => Ok(ServerState::Ready),
            "drain" => Ok(ServerState::Drain),
            "maint" | "maintenance" => Ok(ServerState::Maint),
            _ => Err(RuntimeError::InvalidState(s.to_string())),
        }
    }
}

/// Operations on the live proxy process.
pub trait RuntimeChannel {
    /// `state` is parsed as a [`ServerState`], case-insensitively.
    fn set_server_state(&self, backend: &str, server: &str, state: &str) -> RuntimeResult<()>;
    fn set_server_addr(
        &self,
        backend: &str,
        server: &str,
        ip: &str,
        port: u16,
    ) -> RuntimeResult<()>;
    /// Send a raw command; response lines of every endpoint, in endpoint order.
    fn execute_raw(&self, command: &str) -> RuntimeResult<Vec<String>>;
    fn is_feature_enabled(&self, name: &str) -> RuntimeResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_state_parsing() {
        assert_eq!("MAINT".parse::<ServerState>().unwrap(), ServerState::Maint);
        assert_eq!("up".parse::<ServerState>().unwrap(), ServerState::Ready);
        assert_eq!(" Drain ".parse::<ServerState>().unwrap(), ServerState::Drain);
        assert!(matches!(
            "sleeping".parse::<ServerState>(),
            Err(RuntimeError::InvalidState(s)) if s == "sleeping"
        ));
    }

    #[test]
    fn test_server_state_display() {
        assert_eq!(ServerState::Maint.to_string(), "maint");
    }
}
