//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use proxy_config_client::models::{
    Backend, BackendSwitchingRule, Bind, Defaults, Frontend, Global, HttpRequestRule,
    HttpResponseRule, RuleParent, Server, TcpRequestRule,
};
use proxy_config_client::runtime::{RuntimeChannel, RuntimeError, RuntimeResult};
use proxy_config_client::store::{
    ConfigurationStore, FileStore, StoreError, StoreParams, StoreResult, Transaction,
};
use proxy_config_client::Client;
use tempfile::TempDir;

/// Open a `FileStore` in a fresh temp dir; `program` is the check binary.
pub fn temp_store(program: &str) -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(StoreParams {
        config_file: dir.path().join("proxy.toml"),
        transaction_dir: Some(dir.path().join("transactions")),
        program: program.into(),
    })
    .unwrap();
    (dir, store)
}

/// Transaction lifecycle calls observed by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Version,
    Start(i64),
    Commit(String),
    Delete(String),
}

/// A `FileStore` wrapper that records lifecycle calls and can be told to misbehave.
pub struct RecordingStore {
    _dir: TempDir,
    pub inner: FileStore,
    pub calls: RefCell<Vec<StoreCall>>,
    /// Replaces the real version read when set.
    pub version: Option<StoreResult<i64>>,
    pub fail_commit: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        let (dir, inner) = temp_store("true");
        Self {
            _dir: dir,
            inner,
            calls: RefCell::new(Vec::new()),
            version: None,
            fail_commit: false,
        }
    }

    pub fn with_version(version: StoreResult<i64>) -> Self {
        Self {
            version: Some(version),
            ..Self::new()
        }
    }

    pub fn commits(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::Commit(_)))
            .count()
    }

    pub fn deletes(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::Delete(_)))
            .count()
    }

    pub fn starts(&self) -> Vec<i64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                StoreCall::Start(base) => Some(*base),
                _ => None,
            })
            .collect()
    }
}

impl ConfigurationStore for RecordingStore {
    fn version(&self) -> StoreResult<i64> {
        self.calls.borrow_mut().push(StoreCall::Version);
        match &self.version {
            Some(Ok(version)) => Ok(*version),
            Some(Err(_)) => Err(StoreError::TransactionNotFound("version".into())),
            None => self.inner.version(),
        }
    }

    fn start_transaction(&self, base_version: i64) -> StoreResult<Transaction> {
        self.calls.borrow_mut().push(StoreCall::Start(base_version));
        self.inner.start_transaction(base_version)
    }

    fn commit_transaction(&self, transaction_id: &str) -> StoreResult<i64> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Commit(transaction_id.to_string()));
        if self.fail_commit {
            // Same outcome as a rejected candidate: the staged transaction is dropped.
            let _ = self.inner.delete_transaction(transaction_id);
            return Err(StoreError::Validation(vec!["rejected by test".into()]));
        }
        self.inner.commit_transaction(transaction_id)
    }

    fn delete_transaction(&self, transaction_id: &str) -> StoreResult<()> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Delete(transaction_id.to_string()));
        self.inner.delete_transaction(transaction_id)
    }

    fn backends(&self, t: &str) -> StoreResult<Vec<Backend>> {
        self.inner.backends(t)
    }
    fn backend(&self, t: &str, name: &str) -> StoreResult<Backend> {
        self.inner.backend(t, name)
    }
    fn create_backend(&self, t: &str, b: &Backend) -> StoreResult<()> {
        self.inner.create_backend(t, b)
    }
    fn edit_backend(&self, t: &str, b: &Backend) -> StoreResult<()> {
        self.inner.edit_backend(t, b)
    }
    fn delete_backend(&self, t: &str, name: &str) -> StoreResult<()> {
        self.inner.delete_backend(t, name)
    }

    fn frontends(&self, t: &str) -> StoreResult<Vec<Frontend>> {
        self.inner.frontends(t)
    }
    fn frontend(&self, t: &str, name: &str) -> StoreResult<Frontend> {
        self.inner.frontend(t, name)
    }
    fn create_frontend(&self, t: &str, f: &Frontend) -> StoreResult<()> {
        self.inner.create_frontend(t, f)
    }
    fn edit_frontend(&self, t: &str, f: &Frontend) -> StoreResult<()> {
        self.inner.edit_frontend(t, f)
    }
    fn delete_frontend(&self, t: &str, name: &str) -> StoreResult<()> {
        self.inner.delete_frontend(t, name)
    }

    fn binds(&self, t: &str, fe: &str) -> StoreResult<Vec<Bind>> {
        self.inner.binds(t, fe)
    }
    fn bind(&self, t: &str, fe: &str, name: &str) -> StoreResult<Bind> {
        self.inner.bind(t, fe, name)
    }
    fn create_bind(&self, t: &str, fe: &str, b: &Bind) -> StoreResult<()> {
        self.inner.create_bind(t, fe, b)
    }
    fn edit_bind(&self, t: &str, fe: &str, b: &Bind) -> StoreResult<()> {
        self.inner.edit_bind(t, fe, b)
    }
    fn delete_bind(&self, t: &str, fe: &str, name: &str) -> StoreResult<()> {
        self.inner.delete_bind(t, fe, name)
    }

    fn servers(&self, t: &str, be: &str) -> StoreResult<Vec<Server>> {
        self.inner.servers(t, be)
    }
    fn server(&self, t: &str, be: &str, name: &str) -> StoreResult<Server> {
        self.inner.server(t, be, name)
    }
    fn create_server(&self, t: &str, be: &str, s: &Server) -> StoreResult<()> {
        self.inner.create_server(t, be, s)
    }
    fn edit_server(&self, t: &str, be: &str, s: &Server) -> StoreResult<()> {
        self.inner.edit_server(t, be, s)
    }
    fn delete_server(&self, t: &str, be: &str, name: &str) -> StoreResult<()> {
        self.inner.delete_server(t, be, name)
    }

    fn switching_rules(&self, t: &str, fe: &str) -> StoreResult<Vec<BackendSwitchingRule>> {
        self.inner.switching_rules(t, fe)
    }
    fn switching_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<BackendSwitchingRule> {
        self.inner.switching_rule(t, fe, i)
    }
    fn create_switching_rule(
        &self,
        t: &str,
        fe: &str,
        r: &BackendSwitchingRule,
    ) -> StoreResult<()> {
        self.inner.create_switching_rule(t, fe, r)
    }
    fn edit_switching_rule(
        &self,
        t: &str,
        fe: &str,
        i: usize,
        r: &BackendSwitchingRule,
    ) -> StoreResult<()> {
        self.inner.edit_switching_rule(t, fe, i, r)
    }
    fn delete_switching_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<()> {
        self.inner.delete_switching_rule(t, fe, i)
    }

    fn http_request_rules(&self, t: &str, p: &RuleParent) -> StoreResult<Vec<HttpRequestRule>> {
        self.inner.http_request_rules(t, p)
    }
    fn http_request_rule(&self, t: &str, p: &RuleParent, i: usize) -> StoreResult<HttpRequestRule> {
        self.inner.http_request_rule(t, p, i)
    }
    fn create_http_request_rule(
        &self,
        t: &str,
        p: &RuleParent,
        r: &HttpRequestRule,
    ) -> StoreResult<()> {
        self.inner.create_http_request_rule(t, p, r)
    }
    fn edit_http_request_rule(
        &self,
        t: &str,
        p: &RuleParent,
        i: usize,
        r: &HttpRequestRule,
    ) -> StoreResult<()> {
        self.inner.edit_http_request_rule(t, p, i, r)
    }
    fn delete_http_request_rule(&self, t: &str, p: &RuleParent, i: usize) -> StoreResult<()> {
        self.inner.delete_http_request_rule(t, p, i)
    }

    fn http_response_rules(&self, t: &str, fe: &str) -> StoreResult<Vec<HttpResponseRule>> {
        self.inner.http_response_rules(t, fe)
    }
    fn http_response_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<HttpResponseRule> {
        self.inner.http_response_rule(t, fe, i)
    }
    fn create_http_response_rule(
        &self,
        t: &str,
        fe: &str,
        r: &HttpResponseRule,
    ) -> StoreResult<()> {
        self.inner.create_http_response_rule(t, fe, r)
    }
    fn edit_http_response_rule(
        &self,
        t: &str,
        fe: &str,
        i: usize,
        r: &HttpResponseRule,
    ) -> StoreResult<()> {
        self.inner.edit_http_response_rule(t, fe, i, r)
    }
    fn delete_http_response_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<()> {
        self.inner.delete_http_response_rule(t, fe, i)
    }

    fn tcp_request_rules(&self, t: &str, fe: &str) -> StoreResult<Vec<TcpRequestRule>> {
        self.inner.tcp_request_rules(t, fe)
    }
    fn tcp_request_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<TcpRequestRule> {
        self.inner.tcp_request_rule(t, fe, i)
    }
    fn create_tcp_request_rule(&self, t: &str, fe: &str, r: &TcpRequestRule) -> StoreResult<()> {
        self.inner.create_tcp_request_rule(t, fe, r)
    }
    fn edit_tcp_request_rule(
        &self,
        t: &str,
        fe: &str,
        i: usize,
        r: &TcpRequestRule,
    ) -> StoreResult<()> {
        self.inner.edit_tcp_request_rule(t, fe, i, r)
    }
    fn delete_tcp_request_rule(&self, t: &str, fe: &str, i: usize) -> StoreResult<()> {
        self.inner.delete_tcp_request_rule(t, fe, i)
    }

    fn global(&self, t: &str) -> StoreResult<Global> {
        self.inner.global(t)
    }
    fn replace_global(&self, t: &str, g: &Global) -> StoreResult<()> {
        self.inner.replace_global(t, g)
    }
    fn defaults(&self, t: &str) -> StoreResult<Defaults> {
        self.inner.defaults(t)
    }
    fn replace_defaults(&self, t: &str, d: &Defaults) -> StoreResult<()> {
        self.inner.replace_defaults(t, d)
    }
}

/// Runtime fake recording every command it receives.
#[derive(Default)]
pub struct RecordingRuntime {
    pub calls: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingRuntime {
    fn record(&self, call: String) -> RuntimeResult<()> {
        self.calls.borrow_mut().push(call.clone());
        if self.fail {
            return Err(RuntimeError::Command {
                command: call,
                response: "No such server.".into(),
            });
        }
        Ok(())
    }
}

impl RuntimeChannel for RecordingRuntime {
    fn set_server_state(&self, backend: &str, server: &str, state: &str) -> RuntimeResult<()> {
        self.record(format!("state {}/{} {}", backend, server, state))
    }

    fn set_server_addr(
        &self,
        backend: &str,
        server: &str,
        ip: &str,
        port: u16,
    ) -> RuntimeResult<()> {
        self.record(format!("addr {}/{} {}:{}", backend, server, ip, port))
    }

    fn execute_raw(&self, command: &str) -> RuntimeResult<Vec<String>> {
        self.record(format!("raw {}", command))?;
        Ok(vec![String::new()])
    }

    fn is_feature_enabled(&self, name: &str) -> RuntimeResult<bool> {
        self.record(format!("feature {}", name))?;
        Ok(name == "enabled")
    }
}

pub fn recording_client() -> Client<RecordingStore, RecordingRuntime> {
    Client::new(RecordingStore::new(), RecordingRuntime::default())
}

/// Start a fake runtime socket answering each command with `respond(command)`.
///
/// Returns the commands received so far (connection probes are not recorded).
pub fn start_fake_runtime<F>(path: &Path, respond: F) -> Arc<Mutex<Vec<String>>>
where
    F: Fn(&str) -> String + Send + 'static,
{
    let listener = UnixListener::bind(path).unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let mut stream = match stream {
                Ok(s) => s,
                Err(_) => break,
            };
            let mut line = String::new();
            let read = BufReader::new(&stream).read_line(&mut line).unwrap_or(0);
            if read == 0 {
                continue;
            }
            let command = line.trim_end().to_string();
            let response = respond(&command);
            log.lock().unwrap().push(command);
            let _ = stream.write_all(response.as_bytes());
        }
    });

    received
}

pub fn socket_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
