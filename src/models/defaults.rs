//! Process-wide (`global`) and `defaults` settings.
//!
//! Every field is optional: `None` means the directive is absent from
//! the configuration and the proxy's built-in default applies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A `log` directive target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogTarget {
    /// Syslog address, e.g. "127.0.0.1:514" or "stdout".
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// `log global`: inherit the global log targets.
    #[serde(default)]
    pub global: bool,
}

impl LogTarget {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            facility: None,
            level: None,
            format: None,
            global: false,
        }
    }
}

/// The `global` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Global {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daemon: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbthread: Option<i64>,

    /// Maximum time old processes may linger after a reload (e.g. "30s").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_stop_after: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log_targets: Vec<LogTarget>,
}

/// The unnamed `defaults` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxconn: Option<i64>,

    /// Boolean `option` toggles; `false` renders as `no option <name>`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, bool>,

    /// Named timeouts ("connect", "client", "server", ...) to durations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub timeouts: BTreeMap<String, String>,
}
