//! Backends and their servers.

use serde::{Deserialize, Serialize};

use super::rules::HttpRequestRule;
use super::{HttpConnectionMode, Mode};

/// Load balancing algorithm of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Balance {
    #[default]
    Roundrobin,
    Leastconn,
    Source,
    Uri,
    Random,
}

/// A named pool of servers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Backend {
    /// Unique backend identifier.
    pub name: String,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub balance: Balance,

    /// Settings inherited by every server of the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server: Option<DefaultServer>,

    /// Health check timeout (e.g. "5s").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_timeout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_connection_mode: Option<HttpConnectionMode>,

    /// Add `X-Forwarded-For` to proxied requests.
    #[serde(default)]
    pub forwardfor: bool,

    /// Sticky session cookie name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
}

impl Backend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// `default-server` line of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct DefaultServer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<bool>,

    /// Interval between health checks (e.g. "2s").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rise: Option<i64>,
}

/// A server inside a backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Server {
    /// Server name, unique within its backend.
    pub name: String,

    /// IP address or hostname.
    pub address: String,

    pub port: u16,

    #[serde(default = "default_weight")]
    pub weight: u32,

    /// Enable health checks.
    #[serde(default)]
    pub check: bool,

    /// Start the server in maintenance mode.
    #[serde(default)]
    pub maintenance: bool,

    #[serde(default)]
    pub ssl: bool,

    /// Verify the upstream certificate when `ssl` is set.
    #[serde(default)]
    pub verify: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxconn: Option<i64>,

    /// Prepend a PROXY protocol header.
    #[serde(default)]
    pub send_proxy: bool,
}

fn default_weight() -> u32 {
    1
}

impl Server {
    pub fn new(name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port,
            weight: default_weight(),
            check: false,
            maintenance: false,
            ssl: false,
            verify: false,
            maxconn: None,
            send_proxy: false,
        }
    }
}

/// A backend together with the entities it owns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSection {
    pub backend: Backend,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_request_rules: Vec<HttpRequestRule>,
}

impl From<Backend> for BackendSection {
    fn from(backend: Backend) -> Self {
        Self {
            backend,
            servers: Vec::new(),
            http_request_rules: Vec::new(),
        }
    }
}
