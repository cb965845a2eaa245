//! Transactional client for a reverse proxy's configuration.
//!
//! Changes to backends, frontends, rules and defaults are grouped into a
//! transaction against a versioned configuration store. Committing a
//! transaction that changed nothing discards it instead of creating a new
//! version. Runtime operations go straight to the running proxy over its
//! socket and never touch the open transaction.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod runtime;
pub mod store;

pub use client::{
    BackendAdmin, Client, DefaultsAdmin, FrontendAdmin, ProxyAdmin, RuntimeControl,
    TransactionLifecycle,
};
pub use config::ClientParams;
pub use error::{ClientError, ClientResult};
