//! Routing and request/response rules.
//!
//! Rules are ordered; `index` is the position inside the owning list.
//! Creating a rule with `index: None` appends it, `Some(i)` inserts at `i`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Condition polarity of a rule (`if` / `unless`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCondition {
    If,
    Unless,
}

/// Owner of an HTTP request rule list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleParent {
    Frontend(String),
    Backend(String),
}

impl fmt::Display for RuleParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParent::Frontend(name) => write!(f, "frontend {}", name),
            RuleParent::Backend(name) => write!(f, "backend {}", name),
        }
    }
}

/// Directs traffic from a frontend to a named backend (`use_backend`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSwitchingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Target backend name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond_test: Option<String>,
}

impl BackendSwitchingRule {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            index: None,
            name: backend.into(),
            cond: None,
            cond_test: None,
        }
    }

    /// Attach an `if <test>` condition.
    pub fn when(mut self, test: impl Into<String>) -> Self {
        self.cond = Some(RuleCondition::If);
        self.cond_test = Some(test.into());
        self
    }
}

/// Action of an `http-request` / `http-response` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HttpRuleType {
    Allow,
    Deny,
    Redirect,
    AddHeader,
    SetHeader,
    DelHeader,
    SetPath,
    SetVar,
    Capture,
}

/// An `http-request` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpRequestRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(rename = "type")]
    pub rule_type: HttpRuleType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond_test: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr_format: Option<String>,

    /// Redirect target or path expression, depending on `rule_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_status: Option<u16>,
}

impl HttpRequestRule {
    pub fn new(rule_type: HttpRuleType) -> Self {
        Self {
            index: None,
            rule_type,
            cond: None,
            cond_test: None,
            hdr_name: None,
            hdr_format: None,
            value: None,
            deny_status: None,
        }
    }
}

/// An `http-response` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpResponseRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(rename = "type")]
    pub rule_type: HttpRuleType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond_test: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr_format: Option<String>,
}

impl HttpResponseRule {
    pub fn new(rule_type: HttpRuleType) -> Self {
        Self {
            index: None,
            rule_type,
            cond: None,
            cond_test: None,
            hdr_name: None,
            hdr_format: None,
        }
    }
}

/// Stage at which a `tcp-request` rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TcpRuleType {
    Connection,
    Content,
    InspectDelay,
    Session,
}

/// A `tcp-request` rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TcpRequestRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(rename = "type")]
    pub rule_type: TcpRuleType,

    /// Action such as "accept" or "reject"; unused for `inspect-delay`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond_test: Option<String>,

    /// Delay for `inspect-delay` (e.g. "5s").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl TcpRequestRule {
    pub fn new(rule_type: TcpRuleType) -> Self {
        Self {
            index: None,
            rule_type,
            action: None,
            cond: None,
            cond_test: None,
            timeout: None,
        }
    }
}
