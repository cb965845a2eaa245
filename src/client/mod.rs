//! Transactional configuration client.
//!
//! # Data Flow
//! ```text
//! start_transaction
//!     → transaction.rs (read version, open staged transaction, dirty = false)
//! entity operations (entities.rs)
//!     → ConfigurationStore, scoped to the open transaction
//!     → success marks the transaction dirty
//! commit_transaction
//!     → dirty: store commit (validated, version + 1)
//!     → clean: store delete (no version created)
//! runtime operations (runtime.rs)
//!     → RuntimeChannel directly, transaction untouched
//! ```
//!
//! # Design Decisions
//! - One transaction per client; mutating calls take `&mut self`, so sharing a
//!   client between callers needs external serialization
//! - Transaction id and dirty flag are plain fields, never global state
//! - Collaborator errors are returned unchanged; nothing is retried

pub mod capabilities;
mod entities;
mod runtime;
pub mod transaction;

pub use capabilities::{
    BackendAdmin, DefaultsAdmin, FrontendAdmin, ProxyAdmin, RuntimeControl, TransactionLifecycle,
};
pub use transaction::TransactionCoordinator;

use std::fmt::Debug;

use crate::config::{validate_params, ClientParams, ConfigError};
use crate::error::{ClientError, ClientResult};
use crate::runtime::{RuntimeChannel, SocketChannel};
use crate::store::{ConfigurationStore, FileStore, StoreResult};

/// Entry point composing a configuration store and a runtime channel.
pub struct Client<S = FileStore, R = SocketChannel> {
    store: S,
    runtime: R,
    transaction: TransactionCoordinator,
}

impl Client<FileStore, SocketChannel> {
    /// Connect to the runtime socket and open the configuration store.
    ///
    /// Fails if either collaborator cannot be established.
    pub fn init(params: &ClientParams) -> ClientResult<Self> {
        validate_params(params)
            .map_err(|errors| ClientError::Init(Box::new(ConfigError::Validation(errors))))?;

        let runtime = SocketChannel::new(&params.runtime_socket, params.runtime_timeout())
            .map_err(|e| ClientError::Init(Box::new(e)))?;
        let store = FileStore::open(params.store_params())
            .map_err(|e| ClientError::Init(Box::new(e)))?;

        tracing::info!(
            config_file = %params.config_file.display(),
            runtime_socket = %params.runtime_socket.display(),
            "Client initialized"
        );
        Ok(Self::new(store, runtime))
    }
}

impl<S: ConfigurationStore, R: RuntimeChannel> Client<S, R> {
    pub fn new(store: S, runtime: R) -> Self {
        Self {
            store,
            runtime,
            transaction: TransactionCoordinator::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Id of the open transaction, if any.
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction.id()
    }

    /// Read inside the open transaction. Never marks it dirty.
    fn read<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&S, &str) -> StoreResult<T>,
    ) -> ClientResult<T> {
        let id = self.transaction.active_id(operation)?;
        Ok(f(&self.store, id)?)
    }

    /// Mutate inside the open transaction; success marks it dirty.
    fn mutate<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&S, &str) -> StoreResult<T>,
    ) -> ClientResult<T> {
        let id = self.transaction.active_id(operation)?;
        let value = f(&self.store, id)?;
        self.transaction.mark_dirty();
        Ok(value)
    }

    /// Best-effort removal of every key returned by `list`.
    ///
    /// Only a missing transaction is an error; listing and delete failures are
    /// logged. Returns whether anything was removed.
    fn delete_all<K: Debug>(
        &mut self,
        operation: &'static str,
        list: impl FnOnce(&S, &str) -> StoreResult<Vec<K>>,
        delete: impl Fn(&S, &str, &K) -> StoreResult<()>,
    ) -> ClientResult<bool> {
        let id = self.transaction.active_id(operation)?;
        let keys = match list(&self.store, id) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Nothing deleted, listing failed");
                return Ok(false);
            }
        };

        let mut removed = false;
        for key in &keys {
            match delete(&self.store, id, key) {
                Ok(()) => removed = true,
                Err(e) => {
                    tracing::warn!(operation, key = ?key, error = %e, "Delete failed, skipping")
                }
            }
        }

        if removed {
            self.transaction.mark_dirty();
        }
        Ok(removed)
    }
}

impl<S: ConfigurationStore, R: RuntimeChannel> TransactionLifecycle for Client<S, R> {
    fn start_transaction(&mut self) -> ClientResult<()> {
        self.transaction.start(&self.store)
    }

    fn commit_transaction(&mut self) -> ClientResult<()> {
        self.transaction.commit(&self.store)
    }

    fn dispose_transaction(&mut self) {
        self.transaction.dispose();
    }

    fn is_transaction_active(&self) -> bool {
        self.transaction.is_active()
    }

    fn is_dirty(&self) -> bool {
        self.transaction.is_dirty()
    }
}
