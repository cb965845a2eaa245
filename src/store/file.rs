//! File-backed configuration store.
//!
//! # Responsibilities
//! - Load the committed configuration document from disk
//! - Stage transactions as private copies of the committed document
//! - Apply entity operations to staged copies
//! - Validate and atomically publish a staged copy on commit

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{
    Backend, BackendSection, BackendSwitchingRule, Bind, Configuration, Defaults, Frontend,
    FrontendSection, Global, HttpRequestRule, HttpResponseRule, RuleParent, Server,
    TcpRequestRule,
};
use crate::store::error::{StoreError, StoreResult};
use crate::store::validation::{ProgramValidator, SemanticValidator, Validator};
use crate::store::{ConfigurationStore, Transaction};

/// Directory name used under the system temp dir when no transaction dir is given.
pub const DEFAULT_TRANSACTION_DIR: &str = "proxy-config-transactions";

/// Parameters for opening a [`FileStore`].
#[derive(Debug, Clone)]
pub struct StoreParams {
    /// The live configuration document.
    pub config_file: PathBuf,
    /// Where candidates are written for validation; defaults to the temp dir.
    pub transaction_dir: Option<PathBuf>,
    /// Checker invoked on every commit; see [`ProgramValidator`].
    pub program: PathBuf,
}

#[derive(Debug)]
struct StagedTransaction {
    base_version: i64,
    config: Configuration,
}

/// A [`ConfigurationStore`] persisting one TOML document.
pub struct FileStore {
    config_file: PathBuf,
    transaction_dir: PathBuf,
    validators: Vec<Box<dyn Validator>>,
    committed: ArcSwap<Configuration>,
    transactions: DashMap<String, StagedTransaction>,
    commit_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store, creating an empty document at version 1 if the file is missing.
    pub fn open(params: StoreParams) -> StoreResult<Self> {
        let transaction_dir = params
            .transaction_dir
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_TRANSACTION_DIR));
        fs::create_dir_all(&transaction_dir).map_err(|source| StoreError::Io {
            path: transaction_dir.clone(),
            source,
        })?;

        let committed = match fs::read_to_string(&params.config_file) {
            Ok(content) => toml::from_str(&content).map_err(|source| StoreError::Parse {
                path: params.config_file.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Configuration::default();
                persist(&params.config_file, &config)?;
                tracing::info!(path = %params.config_file.display(), "Created empty configuration");
                config
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: params.config_file,
                    source,
                })
            }
        };

        tracing::info!(
            path = %params.config_file.display(),
            version = committed.version,
            transaction_dir = %transaction_dir.display(),
            "Configuration store opened"
        );

        Ok(Self {
            config_file: params.config_file,
            transaction_dir,
            validators: vec![
                Box::new(SemanticValidator),
                Box::new(ProgramValidator::new(params.program)),
            ],
            committed: ArcSwap::from_pointee(committed),
            transactions: DashMap::new(),
            commit_lock: Mutex::new(()),
        })
    }

    pub fn transaction_dir(&self) -> &Path {
        &self.transaction_dir
    }

    /// Snapshot of the currently published configuration.
    pub fn committed(&self) -> Arc<Configuration> {
        self.committed.load_full()
    }

    /// Number of staged transactions neither committed nor deleted.
    pub fn open_transactions(&self) -> usize {
        self.transactions.len()
    }

    fn candidate_path(&self, transaction_id: &str) -> PathBuf {
        self.transaction_dir.join(format!("{}.toml", transaction_id))
    }

    fn read<T>(
        &self,
        transaction_id: &str,
        f: impl FnOnce(&Configuration) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let staged = self
            .transactions
            .get(transaction_id)
            .ok_or_else(|| StoreError::TransactionNotFound(transaction_id.to_string()))?;
        f(&staged.config)
    }

    fn write<T>(
        &self,
        transaction_id: &str,
        f: impl FnOnce(&mut Configuration) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut staged = self
            .transactions
            .get_mut(transaction_id)
            .ok_or_else(|| StoreError::TransactionNotFound(transaction_id.to_string()))?;
        f(&mut staged.config)
    }

    /// Move a rejected candidate under `failed/` for inspection.
    fn quarantine(&self, candidate: &Path) {
        let failed_dir = self.transaction_dir.join("failed");
        let result = fs::create_dir_all(&failed_dir).and_then(|_| match candidate.file_name() {
            Some(name) => fs::rename(candidate, failed_dir.join(name)),
            None => Ok(()),
        });
        if let Err(e) = result {
            tracing::warn!(
                candidate = %candidate.display(),
                error = %e,
                "Failed to quarantine candidate"
            );
        }
    }
}

/// Write atomically: sibling temp file, then rename.
fn persist(path: &Path, config: &Configuration) -> StoreResult<()> {
    let content = toml::to_string_pretty(config)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// --- Named and indexed collections ---

trait Named {
    fn name(&self) -> &str;
}

impl Named for BackendSection {
    fn name(&self) -> &str {
        &self.backend.name
    }
}

impl Named for FrontendSection {
    fn name(&self) -> &str {
        &self.frontend.name
    }
}

impl Named for Server {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Bind {
    fn name(&self) -> &str {
        &self.name
    }
}

fn get_named<'a, T: Named>(items: &'a [T], name: &str, kind: &'static str) -> StoreResult<&'a T> {
    items
        .iter()
        .find(|item| item.name() == name)
        .ok_or_else(|| StoreError::not_found(kind, name))
}

fn get_named_mut<'a, T: Named>(
    items: &'a mut [T],
    name: &str,
    kind: &'static str,
) -> StoreResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.name() == name)
        .ok_or_else(|| StoreError::not_found(kind, name))
}

fn insert_named<T: Named>(items: &mut Vec<T>, item: T, kind: &'static str) -> StoreResult<()> {
    if items.iter().any(|existing| existing.name() == item.name()) {
        return Err(StoreError::already_exists(kind, item.name()));
    }
    items.push(item);
    Ok(())
}

fn remove_named<T: Named>(items: &mut Vec<T>, name: &str, kind: &'static str) -> StoreResult<()> {
    let position = items
        .iter()
        .position(|item| item.name() == name)
        .ok_or_else(|| StoreError::not_found(kind, name))?;
    items.remove(position);
    Ok(())
}

trait Indexed: Clone {
    fn index(&self) -> Option<usize>;
    fn set_index(&mut self, index: usize);
}

macro_rules! impl_indexed {
    ($($rule:ty),*) => {
        $(impl Indexed for $rule {
            fn index(&self) -> Option<usize> {
                self.index
            }
            fn set_index(&mut self, index: usize) {
                self.index = Some(index);
            }
        })*
    };
}

impl_indexed!(BackendSwitchingRule, HttpRequestRule, HttpResponseRule, TcpRequestRule);

fn renumber<T: Indexed>(rules: &mut [T]) {
    for (i, rule) in rules.iter_mut().enumerate() {
        rule.set_index(i);
    }
}

fn insert_indexed<T: Indexed>(rules: &mut Vec<T>, rule: &T, kind: &'static str) -> StoreResult<()> {
    let position = rule.index().unwrap_or(rules.len());
    if position > rules.len() {
        return Err(StoreError::IndexOutOfRange {
            kind,
            index: position,
            len: rules.len(),
        });
    }
    rules.insert(position, rule.clone());
    renumber(rules);
    Ok(())
}

fn remove_indexed<T: Indexed>(
    rules: &mut Vec<T>,
    index: usize,
    kind: &'static str,
) -> StoreResult<()> {
    if index >= rules.len() {
        return Err(StoreError::IndexOutOfRange {
            kind,
            index,
            len: rules.len(),
        });
    }
    rules.remove(index);
    renumber(rules);
    Ok(())
}

fn get_indexed<T: Indexed>(rules: &[T], index: usize, kind: &'static str) -> StoreResult<T> {
    let mut rule = rules
        .get(index)
        .cloned()
        .ok_or(StoreError::IndexOutOfRange {
            kind,
            index,
            len: rules.len(),
        })?;
    rule.set_index(index);
    Ok(rule)
}

fn replace_indexed<T: Indexed>(
    rules: &mut [T],
    index: usize,
    rule: &T,
    kind: &'static str,
) -> StoreResult<()> {
    let len = rules.len();
    let slot = rules
        .get_mut(index)
        .ok_or(StoreError::IndexOutOfRange { kind, index, len })?;
    *slot = rule.clone();
    slot.set_index(index);
    Ok(())
}

fn list_indexed<T: Indexed>(rules: &[T]) -> Vec<T> {
    let mut rules = rules.to_vec();
    renumber(&mut rules);
    rules
}

fn frontend_section<'a>(config: &'a Configuration, name: &str) -> StoreResult<&'a FrontendSection> {
    config
        .frontend(name)
        .ok_or_else(|| StoreError::not_found("frontend", name))
}

fn frontend_section_mut<'a>(
    config: &'a mut Configuration,
    name: &str,
) -> StoreResult<&'a mut FrontendSection> {
    config
        .frontend_mut(name)
        .ok_or_else(|| StoreError::not_found("frontend", name))
}

fn backend_section<'a>(config: &'a Configuration, name: &str) -> StoreResult<&'a BackendSection> {
    config
        .backend(name)
        .ok_or_else(|| StoreError::not_found("backend", name))
}

fn backend_section_mut<'a>(
    config: &'a mut Configuration,
    name: &str,
) -> StoreResult<&'a mut BackendSection> {
    config
        .backend_mut(name)
        .ok_or_else(|| StoreError::not_found("backend", name))
}

fn http_request_rules_mut<'a>(
    config: &'a mut Configuration,
    parent: &RuleParent,
) -> StoreResult<&'a mut Vec<HttpRequestRule>> {
    match parent {
        RuleParent::Frontend(name) => {
            Ok(&mut frontend_section_mut(config, name)?.http_request_rules)
        }
        RuleParent::Backend(name) => Ok(&mut backend_section_mut(config, name)?.http_request_rules),
    }
}

impl ConfigurationStore for FileStore {
    fn version(&self) -> StoreResult<i64> {
        Ok(self.committed.load().version)
    }

    fn start_transaction(&self, base_version: i64) -> StoreResult<Transaction> {
        let committed = self.committed.load_full();
        if base_version != committed.version {
            return Err(StoreError::VersionMismatch {
                base: base_version,
                current: committed.version,
            });
        }

        let id = Uuid::new_v4().to_string();
        self.transactions.insert(
            id.clone(),
            StagedTransaction {
                base_version,
                config: (*committed).clone(),
            },
        );
        tracing::debug!(transaction = %id, version = base_version, "Transaction staged");
        Ok(Transaction { id, base_version })
    }

    fn commit_transaction(&self, transaction_id: &str) -> StoreResult<i64> {
        let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // The staged copy stays in place until the commit is published or rejected.
        let (base, mut candidate) = {
            let staged = self
                .transactions
                .get(transaction_id)
                .ok_or_else(|| StoreError::TransactionNotFound(transaction_id.to_string()))?;
            (staged.base_version, staged.config.clone())
        };

        let current = self.committed.load().version;
        if base != current {
            return Err(StoreError::VersionMismatch { base, current });
        }
        candidate.version = current + 1;

        let candidate_path = self.candidate_path(transaction_id);
        if let Err(e) = persist(&candidate_path, &candidate) {
            tracing::warn!(transaction = %transaction_id, error = %e, "Failed to write candidate");
            return Err(e);
        }

        for validator in &self.validators {
            if let Err(e) = validator.validate(&candidate_path, &candidate) {
                tracing::warn!(
                    transaction = %transaction_id,
                    error = %e,
                    "Commit rejected by validation"
                );
                self.quarantine(&candidate_path);
                self.transactions.remove(transaction_id);
                return Err(e);
            }
        }

        if let Err(e) = persist(&self.config_file, &candidate) {
            tracing::warn!(
                transaction = %transaction_id,
                error = %e,
                "Failed to publish configuration"
            );
            return Err(e);
        }

        let version = candidate.version;
        self.committed.store(Arc::new(candidate));
        self.transactions.remove(transaction_id);

        if let Err(e) = remove_if_exists(&candidate_path) {
            tracing::warn!(transaction = %transaction_id, error = %e, "Failed to remove candidate");
        }
        tracing::info!(transaction = %transaction_id, version, "Configuration committed");
        Ok(version)
    }

    fn delete_transaction(&self, transaction_id: &str) -> StoreResult<()> {
        self.transactions
            .remove(transaction_id)
            .ok_or_else(|| StoreError::TransactionNotFound(transaction_id.to_string()))?;
        remove_if_exists(&self.candidate_path(transaction_id))?;
        tracing::debug!(transaction = %transaction_id, "Transaction deleted");
        Ok(())
    }

    fn backends(&self, transaction_id: &str) -> StoreResult<Vec<Backend>> {
        self.read(transaction_id, |config| {
            Ok(config.backends.iter().map(|s| s.backend.clone()).collect())
        })
    }

    fn backend(&self, transaction_id: &str, name: &str) -> StoreResult<Backend> {
        self.read(transaction_id, |config| {
            Ok(backend_section(config, name)?.backend.clone())
        })
    }

    fn create_backend(&self, transaction_id: &str, backend: &Backend) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            insert_named(&mut config.backends, backend.clone().into(), "backend")
        })
    }

    fn edit_backend(&self, transaction_id: &str, backend: &Backend) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            backend_section_mut(config, &backend.name)?.backend = backend.clone();
            Ok(())
        })
    }

    fn delete_backend(&self, transaction_id: &str, name: &str) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            remove_named(&mut config.backends, name, "backend")
        })
    }

    fn frontends(&self, transaction_id: &str) -> StoreResult<Vec<Frontend>> {
        self.read(transaction_id, |config| {
            Ok(config.frontends.iter().map(|s| s.frontend.clone()).collect())
        })
    }

    fn frontend(&self, transaction_id: &str, name: &str) -> StoreResult<Frontend> {
        self.read(transaction_id, |config| {
            Ok(frontend_section(config, name)?.frontend.clone())
        })
    }

    fn create_frontend(&self, transaction_id: &str, frontend: &Frontend) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            insert_named(&mut config.frontends, frontend.clone().into(), "frontend")
        })
    }

    fn edit_frontend(&self, transaction_id: &str, frontend: &Frontend) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            frontend_section_mut(config, &frontend.name)?.frontend = frontend.clone();
            Ok(())
        })
    }

    fn delete_frontend(&self, transaction_id: &str, name: &str) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            remove_named(&mut config.frontends, name, "frontend")
        })
    }

    fn binds(&self, transaction_id: &str, frontend: &str) -> StoreResult<Vec<Bind>> {
        self.read(transaction_id, |config| {
            Ok(frontend_section(config, frontend)?.binds.clone())
        })
    }

    fn bind(&self, transaction_id: &str, frontend: &str, name: &str) -> StoreResult<Bind> {
        self.read(transaction_id, |config| {
            Ok(get_named(&frontend_section(config, frontend)?.binds, name, "bind")?.clone())
        })
    }

    fn create_bind(&self, transaction_id: &str, frontend: &str, bind: &Bind) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            insert_named(&mut frontend_section_mut(config, frontend)?.binds, bind.clone(), "bind")
        })
    }

    fn edit_bind(&self, transaction_id: &str, frontend: &str, bind: &Bind) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            *get_named_mut(&mut section.binds, &bind.name, "bind")? = bind.clone();
            Ok(())
        })
    }

    fn delete_bind(&self, transaction_id: &str, frontend: &str, name: &str) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            remove_named(&mut frontend_section_mut(config, frontend)?.binds, name, "bind")
        })
    }

    fn servers(&self, transaction_id: &str, backend: &str) -> StoreResult<Vec<Server>> {
        self.read(transaction_id, |config| {
            Ok(backend_section(config, backend)?.servers.clone())
        })
    }

    fn server(&self, transaction_id: &str, backend: &str, name: &str) -> StoreResult<Server> {
        self.read(transaction_id, |config| {
            Ok(get_named(&backend_section(config, backend)?.servers, name, "server")?.clone())
        })
    }

    fn create_server(
        &self,
        transaction_id: &str,
        backend: &str,
        server: &Server,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = backend_section_mut(config, backend)?;
            insert_named(&mut section.servers, server.clone(), "server")
        })
    }

    fn edit_server(&self, transaction_id: &str, backend: &str, server: &Server) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = backend_section_mut(config, backend)?;
            *get_named_mut(&mut section.servers, &server.name, "server")? = server.clone();
            Ok(())
        })
    }

    fn delete_server(&self, transaction_id: &str, backend: &str, name: &str) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            remove_named(&mut backend_section_mut(config, backend)?.servers, name, "server")
        })
    }

    fn switching_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<BackendSwitchingRule>> {
        self.read(transaction_id, |config| {
            Ok(list_indexed(&frontend_section(config, frontend)?.switching_rules))
        })
    }

    fn switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<BackendSwitchingRule> {
        self.read(transaction_id, |config| {
            let section = frontend_section(config, frontend)?;
            get_indexed(&section.switching_rules, index, "backend switching rule")
        })
    }

    fn edit_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &BackendSwitchingRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            replace_indexed(&mut section.switching_rules, index, rule, "backend switching rule")
        })
    }

    fn create_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &BackendSwitchingRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            insert_indexed(&mut section.switching_rules, rule, "backend switching rule")
        })
    }

    fn delete_switching_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            remove_indexed(&mut section.switching_rules, index, "backend switching rule")
        })
    }

    fn http_request_rules(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
    ) -> StoreResult<Vec<HttpRequestRule>> {
        self.read(transaction_id, |config| {
            let rules = match parent {
                RuleParent::Frontend(name) => &frontend_section(config, name)?.http_request_rules,
                RuleParent::Backend(name) => &backend_section(config, name)?.http_request_rules,
            };
            Ok(list_indexed(rules))
        })
    }

    fn http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
    ) -> StoreResult<HttpRequestRule> {
        self.read(transaction_id, |config| {
            let rules = match parent {
                RuleParent::Frontend(name) => &frontend_section(config, name)?.http_request_rules,
                RuleParent::Backend(name) => &backend_section(config, name)?.http_request_rules,
            };
            get_indexed(rules, index, "http-request rule")
        })
    }

    fn edit_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
        rule: &HttpRequestRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let rules = http_request_rules_mut(config, parent)?;
            replace_indexed(rules, index, rule, "http-request rule")
        })
    }

    fn create_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        rule: &HttpRequestRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            insert_indexed(http_request_rules_mut(config, parent)?, rule, "http-request rule")
        })
    }

    fn delete_http_request_rule(
        &self,
        transaction_id: &str,
        parent: &RuleParent,
        index: usize,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            remove_indexed(http_request_rules_mut(config, parent)?, index, "http-request rule")
        })
    }

    fn http_response_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<HttpResponseRule>> {
        self.read(transaction_id, |config| {
            Ok(list_indexed(&frontend_section(config, frontend)?.http_response_rules))
        })
    }

    fn http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<HttpResponseRule> {
        self.read(transaction_id, |config| {
            let section = frontend_section(config, frontend)?;
            get_indexed(&section.http_response_rules, index, "http-response rule")
        })
    }

    fn edit_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &HttpResponseRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            replace_indexed(&mut section.http_response_rules, index, rule, "http-response rule")
        })
    }

    fn create_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &HttpResponseRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            insert_indexed(&mut section.http_response_rules, rule, "http-response rule")
        })
    }

    fn delete_http_response_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            remove_indexed(&mut section.http_response_rules, index, "http-response rule")
        })
    }

    fn tcp_request_rules(
        &self,
        transaction_id: &str,
        frontend: &str,
    ) -> StoreResult<Vec<TcpRequestRule>> {
        self.read(transaction_id, |config| {
            Ok(list_indexed(&frontend_section(config, frontend)?.tcp_request_rules))
        })
    }

    fn tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<TcpRequestRule> {
        self.read(transaction_id, |config| {
            let section = frontend_section(config, frontend)?;
            get_indexed(&section.tcp_request_rules, index, "tcp-request rule")
        })
    }

    fn edit_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
        rule: &TcpRequestRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            replace_indexed(&mut section.tcp_request_rules, index, rule, "tcp-request rule")
        })
    }

    fn create_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        rule: &TcpRequestRule,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            insert_indexed(&mut section.tcp_request_rules, rule, "tcp-request rule")
        })
    }

    fn delete_tcp_request_rule(
        &self,
        transaction_id: &str,
        frontend: &str,
        index: usize,
    ) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            let section = frontend_section_mut(config, frontend)?;
            remove_indexed(&mut section.tcp_request_rules, index, "tcp-request rule")
        })
    }

    fn global(&self, transaction_id: &str) -> StoreResult<Global> {
        self.read(transaction_id, |config| Ok(config.global.clone()))
    }

    fn replace_global(&self, transaction_id: &str, global: &Global) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            config.global = global.clone();
            Ok(())
        })
    }

    fn defaults(&self, transaction_id: &str) -> StoreResult<Defaults> {
        self.read(transaction_id, |config| Ok(config.defaults.clone()))
    }

    fn replace_defaults(&self, transaction_id: &str, defaults: &Defaults) -> StoreResult<()> {
        self.write(transaction_id, |config| {
            config.defaults = defaults.clone();
            Ok(())
        })
    }
}
