//! Versioned configuration store.
//!
//! # Data Flow
//! ```text
//! version()                 → committed version (read only)
//! start_transaction(base)   → staged copy of the committed Configuration
//! entity CRUD(txn, ...)     → applied to the staged copy only
//! commit_transaction(txn)   → candidate written → validators → atomic swap, version + 1
//! delete_transaction(txn)   → staged copy dropped, version untouched
//! ```
//!
//! # Design Decisions
//! - `ConfigurationStore` is the seam the client is written against; `FileStore`
//!   is the bundled implementation
//! - Validation runs on every commit and cannot be switched off
//! - Staged transactions are independent of each other; the first commit wins
//!   and later commits on the same base fail with `VersionMismatch`

pub mod error;
pub mod file;
pub mod validation;

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, StoreParams};
pub use validation::{ProgramValidator, SemanticValidator, Validator};

use crate::models::{
    Backend, BackendSwitchingRule, Bind, Defaults, Frontend, Global, HttpRequestRule,
    HttpResponseRule, RuleParent, Server, TcpRequestRule,
};

/// Handle of a staged transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Opaque identifier, never empty.
    pub id: String,
    /// Version the transaction was staged from.
    pub base_version: i64,
}

/// Operations a configuration store offers to the client.
///
/// Every entity call takes the id of an open transaction and reads or mutates
/// that transaction's staged configuration.
pub trait ConfigurationStore {
    fn version(&self) -> StoreResult<i64>;
    fn start_transaction(&self, base_version: i64) -> StoreResult<Transaction>;
    /// Validate and publish the staged configuration. Returns the new version.
    fn commit_transaction(&self, transaction_id: &str) -> StoreResult<i64>;
    /// Abandon a staged transaction without publishing it.
    fn delete_transaction(&self, transaction_id: &str) -> StoreResult<()>;

    fn backends(&self, transaction_id: &str) -> StoreResult<Vec<Backend>>;
    fn backend(&self, transaction_id: &str, name: &str) -> StoreResult<Backend>;
    fn create_backend(&self, transaction_id: &str, backend: &Backend) -> StoreResult<()>;
    fn edit_backend(&self, transaction_id: &str, backend: &Backend) -> StoreResult<()>;
    fn delete_backend(&self, transaction_id: &str, name: &str) -> StoreResult<()>;

    fn frontends(&self, transaction_id: &str) -> StoreResult<Vec<Frontend>>;
    fn frontend(&self, transaction_id: &str, name: &str) -> StoreResult<Frontend>;
    fn create_frontend(&self, transaction_id: &str, frontend: &Frontend) -> StoreResult<()>;
    fn edit_frontend(&self, transaction_id: &str, frontend: &Frontend) -> StoreResult<()>;
    fn delete_frontend(&self, transaction_id: &str, name: &str) -> StoreResult<()>;

    fn binds(&self, transaction_id: &str, frontend: &str) -> StoreResult<Vec<Bind>>;
    fn bind(&self, transaction_id: &str, frontend: &str, name: &str) -> StoreResult<Bind>;
    fn create_bind(&self, transaction_id: &str, frontend: &str, bind: &Bind) -> StoreResult<()>;
    fn edit_bind(&self, transaction_id: &str, frontend: &str, bind: &Bind) -> StoreResult<()>;
    fn delete_bind(&self, transaction_id: &str, frontend: &str, name: &str) -> StoreResult<()>;

    fn servers(&self, transaction_id: &str, backend: &str) -> StoreResult<Vec<Server>>;
    fn server(&self, transaction_id: &str, backend: &str, name: &str) -> StoreResult<Server>;
    fn create_server(
        &self,
        transaction_id: &str,
        backend: &str,
        server: &Server,
    ) -> StoreResult<()>;
    fn edit_server(&self, transaction_id: &str, backend: &str, server: &Server) -> StoreResult<()>;
    fn delete_server(&self, transaction_id: &str, backend: &str, name: &str) -> StoreResult<()>;

    fn switching_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<BackendSwitchingRule>>;
    fn switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<BackendSwitchingRule>;
    fn create_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &BackendSwitchingRule,
    ) -> StoreResult<()>;
    fn edit_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &BackendSwitchingRule,
    ) -> StoreResult<()>;
    fn delete_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()>;

    fn http_request_rules(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
    ) -> StoreResult<Vec<HttpRequestRule>>;
    fn http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
    ) -> StoreResult<HttpRequestRule>;
    fn create_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        rule: &HttpRequestRule,
    ) -> StoreResult<()>;
    fn edit_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
        rule: &HttpRequestRule,
    ) -> StoreResult<()>;
    fn delete_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
    ) -> StoreResult<()>;

    fn http_response_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<HttpResponseRule>>;
    fn http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<HttpResponseRule>;
    fn create_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &HttpResponseRule,
    ) -> StoreResult<()>;
    fn edit_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &HttpResponseRule,
    ) -> StoreResult<()>;
    fn delete_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()>;

    fn tcp_request_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<TcpRequestRule>>;
    fn tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<TcpRequestRule>;
    fn create_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &TcpRequestRule,
    ) -> StoreResult<()>;
    fn edit_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &TcpRequestRule,
    ) -> StoreResult<()>;
    fn delete_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()>;

    fn global(&self, transaction_id: &str) -> StoreResult<Global>;
    fn replace_global(&self, transaction_id: &str, global: &Global) -> StoreResult<()>;
    fn defaults(&self, transaction_id: &str) -> StoreResult<Defaults>;
    fn replace_defaults(&self, transaction_id: &str, defaults: &Defaults) -> StoreResult<()>;
}
