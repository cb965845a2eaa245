//! Configuration entity model.
//!
//! # Data Flow
//! ```text
//! orchestration code builds entity values
//!     → client facades (scoped to the open transaction)
//!     → ConfigurationStore (applied to the staged Configuration)
//!     → commit: whole Configuration validated and persisted
//! ```
//!
//! # Design Decisions
//! - Entities are plain serde values; the store owns all semantic checks
//! - Nested entities (binds, rules, servers) live in their owner's section
//! - Optional fields are skipped when serialising to keep documents small

pub mod backend;
pub mod configuration;
pub mod defaults;
pub mod frontend;
pub mod rules;

pub use backend::{Backend, BackendSection, Balance, DefaultServer, Server};
pub use configuration::Configuration;
pub use defaults::{Defaults, Global, LogTarget};
pub use frontend::{Bind, Frontend, FrontendSection};
pub use rules::{
    BackendSwitchingRule, HttpRequestRule, HttpResponseRule, HttpRuleType, RuleCondition,
    RuleParent, TcpRequestRule, TcpRuleType,
};

use serde::{Deserialize, Serialize};

/// Proxy mode shared by frontends and backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Http,
    Tcp,
}

/// HTTP connection handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HttpConnectionMode {
    HttpKeepAlive,
    HttpServerClose,
    Httpclose,
}
