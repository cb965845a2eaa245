//! Unix-socket runtime channel.
//!
//! # Responsibilities
//! - Verify every runtime endpoint is reachable at construction
//! - Send one command per connection and read the response until EOF
//! - Map proxy error responses to `RuntimeError::Command`

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::observability::metrics;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::{RuntimeChannel, ServerState};

/// Response prefixes the proxy uses to report a rejected command.
const FAILURE_PREFIXES: &[&str] = &[
    "No such",
    "Unknown",
    "Invalid",
    "Require",
    "Permission denied",
];

/// A [`RuntimeChannel`] over one or more stats/runtime sockets.
#[derive(Debug, Clone)]
pub struct SocketChannel {
    endpoints: BTreeMap<usize, PathBuf>,
    timeout: Option<Duration>,
}

impl SocketChannel {
    /// Channel bound to a single socket (endpoint 0).
    pub fn new(socket: impl Into<PathBuf>, timeout: Option<Duration>) -> RuntimeResult<Self> {
        Self::with_sockets(BTreeMap::from([(0, socket.into())]), timeout)
    }

    /// Channel bound to several numbered sockets, one per proxy process.
    pub fn with_sockets(
        endpoints: BTreeMap<usize, PathBuf>,
        timeout: Option<Duration>,
    ) -> RuntimeResult<Self> {
        if endpoints.is_empty() {
            return Err(RuntimeError::NoEndpoints);
        }
        for path in endpoints.values() {
            UnixStream::connect(path).map_err(|source| RuntimeError::Connect {
                path: path.clone(),
                source,
            })?;
        }
        tracing::info!(endpoints = endpoints.len(), "Runtime channel ready");
        Ok(Self { endpoints, timeout })
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Path> {
        self.endpoints.values().map(PathBuf::as_path)
    }

    fn send(&self, path: &Path, command: &str) -> RuntimeResult<String> {
        let io_err = |source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut stream = UnixStream::connect(path).map_err(|source| RuntimeError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        stream.set_read_timeout(self.timeout).map_err(io_err)?;
        stream.set_write_timeout(self.timeout).map_err(io_err)?;

        stream
            .write_all(format!("{}\n", command).as_bytes())
            .map_err(io_err)?;

        let mut response = String::new();
        stream.read_to_string(&mut response).map_err(io_err)?;
        Ok(response)
    }

    /// Run `command` on every endpoint, in endpoint order.
    fn execute(&self, label: &'static str, command: &str) -> RuntimeResult<Vec<String>> {
        let mut responses = Vec::with_capacity(self.endpoints.len());
        for (process, path) in &self.endpoints {
            tracing::debug!(process, command = %command, "Runtime command");
            match self.send(path, command) {
                Ok(response) => responses.push(response),
                Err(e) => {
                    metrics::record_runtime_command(label, false);
                    return Err(e);
                }
            }
        }
        Ok(responses)
    }

    fn execute_checked(
        &self,
        label: &'static str,
        command: &str,
        is_failure: impl Fn(&str) -> bool,
    ) -> RuntimeResult<()> {
        for response in self.execute(label, command)? {
            let response = response.trim();
            if is_failure(response) {
                metrics::record_runtime_command(label, false);
                return Err(RuntimeError::Command {
                    command: command.to_string(),
                    response: response.to_string(),
                });
            }
        }
        metrics::record_runtime_command(label, true);
        Ok(())
    }
}

impl RuntimeChannel for SocketChannel {
    fn set_server_state(&self, backend: &str, server: &str, state: &str) -> RuntimeResult<()> {
        let state: ServerState = state.parse()?;
        let command = format!("set server {}/{} state {}", backend, server, state);
        // Success is an empty response.
        self.execute_checked("set_server_state", &command, |response| !response.is_empty())
    }

    fn set_server_addr(
        &self,
        backend: &str,
        server: &str,
        ip: &str,
        port: u16,
    ) -> RuntimeResult<()> {
        let command = format!("set server {}/{} addr {} port {}", backend, server, ip, port);
        self.execute_checked("set_server_addr", &command, |response| {
            FAILURE_PREFIXES.iter().any(|prefix| response.starts_with(prefix))
        })
    }

    fn execute_raw(&self, command: &str) -> RuntimeResult<Vec<String>> {
        let responses = self.execute("raw", command)?;
        metrics::record_runtime_command("raw", true);
        Ok(responses
            .iter()
            .flat_map(|response| response.lines())
            .map(String::from)
            .collect())
    }

    /// Enabled only when every endpoint reports it enabled.
    fn is_feature_enabled(&self, name: &str) -> RuntimeResult<bool> {
        let responses = self.execute("show_info", "show info")?;
        metrics::record_runtime_command("show_info", true);
        Ok(responses.iter().all(|info| info_flag_enabled(info, name)))
    }
}

/// Look up `name: value` in `show info` output.
fn info_flag_enabled(info: &str, name: &str) -> bool {
    info.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map_or(false, |(_, value)| {
            let value = value.trim();
            matches!(value.to_ascii_lowercase().as_str(), "yes" | "on" | "true")
                || value.parse::<i64>().map_or(false, |n| n > 0)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = "Name: HAProxy\nVersion: 2.8.3\nNbthread: 4\nStopping: 0\nZlib_mem_usage: 0\nTainted: 0\nMultiThread: yes\n";

    #[test]
    fn test_info_flag_enabled() {
        assert!(info_flag_enabled(INFO, "Nbthread"));
        assert!(info_flag_enabled(INFO, "multithread"));
        assert!(!info_flag_enabled(INFO, "Stopping"));
        assert!(!info_flag_enabled(INFO, "Missing"));
        assert!(!info_flag_enabled(INFO, "Name"));
    }

    #[test]
    fn test_no_endpoints() {
        assert!(matches!(
            SocketChannel::with_sockets(BTreeMap::new(), None),
            Err(RuntimeError::NoEndpoints)
        ));
    }

    #[test]
    fn test_unreachable_socket() {
        let dir = tempfile::tempdir().unwrap();
        let result = SocketChannel::new(dir.path().join("missing.sock"), None);
        assert!(matches!(result, Err(RuntimeError::Connect { .. })));
    }
}
