//! Capability sets exposed by the client.
//!
//! Orchestration code can depend on the narrowest set it needs
//! (`&mut dyn BackendAdmin`, `&dyn RuntimeControl`, ...) and tests can fake
//! each set independently.

use crate::error::ClientResult;
use crate::models::{
    Backend, BackendSwitchingRule, Bind, Frontend, HttpRequestRule, HttpResponseRule, LogTarget,
    Server, TcpRequestRule,
};

/// Opening, committing and abandoning the client's transaction.
pub trait TransactionLifecycle {
    fn start_transaction(&mut self) -> ClientResult<()>;
    /// Publishes the transaction if anything changed, discards it otherwise.
    fn commit_transaction(&mut self) -> ClientResult<()>;
    /// Client-local cleanup for error paths; safe to call at any time.
    fn dispose_transaction(&mut self);
    fn is_transaction_active(&self) -> bool;
    fn is_dirty(&self) -> bool;
}

/// Backends, their servers and their `http-request` rules.
pub trait BackendAdmin {
    fn backends_get(&self) -> ClientResult<Vec<Backend>>;
    fn backend_get(&self, name: &str) -> ClientResult<Backend>;
    fn backend_create(&mut self, backend: &Backend) -> ClientResult<()>;
    fn backend_edit(&mut self, backend: &Backend) -> ClientResult<()>;
    fn backend_delete(&mut self, name: &str) -> ClientResult<()>;

    fn backend_servers_get(&self, backend: &str) -> ClientResult<Vec<Server>>;
    fn backend_server_get(&self, backend: &str, server: &str) -> ClientResult<Server>;
    fn backend_server_create(&mut self, backend: &str, server: &Server) -> ClientResult<()>;
    fn backend_server_edit(&mut self, backend: &str, server: &Server) -> ClientResult<()>;
    fn backend_server_delete(&mut self, backend: &str, server: &str) -> ClientResult<()>;
    /// Returns whether any server was removed.
    fn backend_server_delete_all(&mut self, backend: &str) -> ClientResult<bool>;

    fn backend_http_request_rules_get(&self, backend: &str) -> ClientResult<Vec<HttpRequestRule>>;
    fn backend_http_request_rule_get(
        &self,
        backend: &str,
        index: usize,
    ) -> ClientResult<HttpRequestRule>;
    fn backend_http_request_rule_create(
        &mut self,
        backend: &str,
        rule: &HttpRequestRule,
    ) -> ClientResult<()>;
    fn backend_http_request_rule_edit(
        &mut self,
        backend: &str,
        index: usize,
        rule: &HttpRequestRule,
    ) -> ClientResult<()>;
    fn backend_http_request_rule_delete(&mut self, backend: &str, index: usize) -> ClientResult<()>;
    fn backend_http_request_rule_delete_all(&mut self, backend: &str) -> ClientResult<bool>;
}

/// Frontends, their binds and the rules they own.
pub trait FrontendAdmin {
    fn frontends_get(&self) -> ClientResult<Vec<Frontend>>;
    fn frontend_get(&self, name: &str) -> ClientResult<Frontend>;
    fn frontend_create(&mut self, frontend: &Frontend) -> ClientResult<()>;
    fn frontend_edit(&mut self, frontend: &Frontend) -> ClientResult<()>;
    fn frontend_delete(&mut self, name: &str) -> ClientResult<()>;

    fn frontend_binds_get(&self, frontend: &str) -> ClientResult<Vec<Bind>>;
    fn frontend_bind_get(&self, frontend: &str, bind: &str) -> ClientResult<Bind>;
    fn frontend_bind_create(&mut self, frontend: &str, bind: &Bind) -> ClientResult<()>;
    fn frontend_bind_edit(&mut self, frontend: &str, bind: &Bind) -> ClientResult<()>;
    fn frontend_bind_delete(&mut self, frontend: &str, bind: &str) -> ClientResult<()>;

    fn backend_switching_rules_get(
        &self,
        frontend: &str,
    ) -> ClientResult<Vec<BackendSwitchingRule>>;
    fn backend_switching_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<BackendSwitchingRule>;
    fn backend_switching_rule_create(
        &mut self,
        frontend: &str,
        rule: &BackendSwitchingRule,
    ) -> ClientResult<()>;
    fn backend_switching_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &BackendSwitchingRule,
    ) -> ClientResult<()>;
    fn backend_switching_rule_delete(&mut self, frontend: &str, index: usize) -> ClientResult<()>;
    fn backend_switching_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool>;

    fn frontend_http_request_rules_get(&self, frontend: &str) -> ClientResult<Vec<HttpRequestRule>>;
    fn frontend_http_request_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<HttpRequestRule>;
    fn frontend_http_request_rule_create(
        &mut self,
        frontend: &str,
        rule: &HttpRequestRule,
    ) -> ClientResult<()>;
    fn frontend_http_request_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &HttpRequestRule,
    ) -> ClientResult<()>;
    fn frontend_http_request_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()>;
    fn frontend_http_request_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool>;

    fn frontend_http_response_rules_get(
        &self,
        frontend: &str,
    ) -> ClientResult<Vec<HttpResponseRule>>;
    fn frontend_http_response_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<HttpResponseRule>;
    fn frontend_http_response_rule_create(
        &mut self,
        frontend: &str,
        rule: &HttpResponseRule,
    ) -> ClientResult<()>;
    fn frontend_http_response_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &HttpResponseRule,
    ) -> ClientResult<()>;
    fn frontend_http_response_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()>;
    fn frontend_http_response_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool>;

    fn frontend_tcp_request_rules_get(&self, frontend: &str) -> ClientResult<Vec<TcpRequestRule>>;
    fn frontend_tcp_request_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<TcpRequestRule>;
    fn frontend_tcp_request_rule_create(
        &mut self,
        frontend: &str,
        rule: &TcpRequestRule,
    ) -> ClientResult<()>;
    fn frontend_tcp_request_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &TcpRequestRule,
    ) -> ClientResult<()>;
    fn frontend_tcp_request_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()>;
    fn frontend_tcp_request_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool>;
}

/// `global` and `defaults` settings. `None` removes the directive.
pub trait DefaultsAdmin {
    fn set_daemon_mode(&mut self, enabled: Option<bool>) -> ClientResult<()>;
    fn set_default_log_format(&mut self, value: Option<&str>) -> ClientResult<()>;
    fn set_default_maxconn(&mut self, value: Option<i64>) -> ClientResult<()>;
    fn set_default_option(&mut self, option: &str, enabled: Option<bool>) -> ClientResult<()>;
    fn set_default_timeout(&mut self, timeout: &str, value: Option<&str>) -> ClientResult<()>;
    /// Replace, append (`index == len`) or remove the log target at `index`.
    fn set_log_target(&mut self, target: Option<&LogTarget>, index: usize) -> ClientResult<()>;
    fn set_hard_stop_after(&mut self, value: Option<&str>) -> ClientResult<()>;
    fn set_nbthread(&mut self, value: Option<i64>) -> ClientResult<()>;
}

/// Immediate commands against the running proxy. Independent of any transaction.
pub trait RuntimeControl {
    fn set_server_state(&self, backend: &str, server: &str, state: &str) -> ClientResult<()>;
    fn set_server_addr(&self, backend: &str, server: &str, ip: &str, port: u16) -> ClientResult<()>;
    fn execute_raw(&self, command: &str) -> ClientResult<Vec<String>>;
    fn is_feature_enabled(&self, name: &str) -> ClientResult<bool>;
}

/// The full client surface.
pub trait ProxyAdmin:
    TransactionLifecycle + BackendAdmin + FrontendAdmin + DefaultsAdmin + RuntimeControl
{
}

impl<T> ProxyAdmin for T where
    T: TransactionLifecycle + BackendAdmin + FrontendAdmin + DefaultsAdmin + RuntimeControl
{
}
