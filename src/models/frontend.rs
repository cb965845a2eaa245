//! Frontends and their binds.

use serde::{Deserialize, Serialize};

use super::rules::{BackendSwitchingRule, HttpRequestRule, HttpResponseRule, TcpRequestRule};
use super::{HttpConnectionMode, Mode};

/// A listening entry point with routing rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Frontend {
    /// Unique frontend identifier.
    pub name: String,

    #[serde(default)]
    pub mode: Mode,

    /// Backend used when no switching rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxconn: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_connection_mode: Option<HttpConnectionMode>,
}

impl Frontend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A listening address of a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Bind {
    /// Bind name, unique within its frontend.
    pub name: String,

    /// Address to listen on ("*" for all interfaces).
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default)]
    pub ssl: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpn: Option<String>,

    /// Accept both IPv4 and IPv6 on a wildcard address.
    #[serde(default)]
    pub v4v6: bool,
}

impl Bind {
    pub fn new(name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port: Some(port),
            ssl: false,
            ssl_certificate: None,
            alpn: None,
            v4v6: false,
        }
    }
}

/// A frontend together with the entities it owns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FrontendSection {
    pub frontend: Frontend,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<Bind>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub switching_rules: Vec<BackendSwitchingRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_request_rules: Vec<HttpRequestRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_response_rules: Vec<HttpResponseRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tcp_request_rules: Vec<TcpRequestRule>,
}

impl From<Frontend> for FrontendSection {
    fn from(frontend: Frontend) -> Self {
        Self {
            frontend,
            binds: Vec::new(),
            switching_rules: Vec::new(),
            http_request_rules: Vec::new(),
            http_response_rules: Vec::new(),
            tcp_request_rules: Vec::new(),
        }
    }
}
