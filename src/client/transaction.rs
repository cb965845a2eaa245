//! Transaction coordinator.
//!
//! # States
//! ```text
//! Idle ──start──▶ Active{dirty=false} ──mutation ok──▶ Active{dirty=true}
//! Active{dirty=false} ──commit──▶ Idle   (store delete: no new version)
//! Active{dirty=true}  ──commit──▶ Idle   (store commit: version + 1)
//! Active{*}           ──dispose─▶ Idle   (client-local only)
//! ```
//!
//! A failed commit or discard leaves the coordinator Active so the caller's
//! error path can inspect it and then `dispose`.

use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::store::ConfigurationStore;

/// Client-side record of the open transaction.
#[derive(Debug, Default)]
pub struct TransactionCoordinator {
    id: Option<String>,
    dirty: bool,
}

impl TransactionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// True once any mutation succeeded in the open transaction.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Open a transaction on top of the store's current version.
    ///
    /// An unreadable or non-positive version is replaced by 1; only a failure
    /// to create the transaction itself is returned.
    pub fn start<S: ConfigurationStore + ?Sized>(&mut self, store: &S) -> ClientResult<()> {
        if let Some(id) = &self.id {
            return Err(ClientError::TransactionAlreadyOpen(id.clone()));
        }

        let base_version = match store.version() {
            Ok(version) if version >= 1 => version,
            Ok(version) => {
                tracing::warn!(version, "Store reported non-positive version, using 1");
                metrics::record_version_fallback("non_positive");
                1
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read configuration version, using 1");
                metrics::record_version_fallback("read_error");
                1
            }
        };

        let transaction = store.start_transaction(base_version)?;
        tracing::debug!(
            transaction = %transaction.id,
            version = base_version,
            "Transaction started"
        );
        self.id = Some(transaction.id);
        self.dirty = false;
        Ok(())
    }

    /// Commit when dirty, otherwise discard without creating a version.
    pub fn commit<S: ConfigurationStore + ?Sized>(&mut self, store: &S) -> ClientResult<()> {
        let id = self.active_id("commit_transaction")?.to_owned();

        if !self.dirty {
            if let Err(e) = store.delete_transaction(&id) {
                metrics::record_transaction(metrics::FAILED);
                return Err(e.into());
            }
            tracing::debug!(transaction = %id, "No changes, transaction discarded");
            metrics::record_transaction(metrics::DISCARDED);
            self.clear();
            return Ok(());
        }

        match store.commit_transaction(&id) {
            Ok(version) => {
                tracing::info!(transaction = %id, version, "Transaction committed");
                metrics::record_transaction(metrics::COMMITTED);
                self.clear();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(transaction = %id, error = %e, "Transaction commit failed");
                metrics::record_transaction(metrics::FAILED);
                Err(e.into())
            }
        }
    }

    /// Forget the open transaction. Never talks to the store; idempotent.
    pub fn dispose(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::debug!(transaction = %id, dirty = self.dirty, "Transaction disposed");
            metrics::record_transaction(metrics::DISPOSED);
        }
        self.dirty = false;
    }

    pub(crate) fn active_id(&self, operation: &'static str) -> ClientResult<&str> {
        self.id
            .as_deref()
            .ok_or(ClientError::NoActiveTransaction { operation })
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn clear(&mut self) {
        self.id = None;
        self.dirty = false;
    }
}
