//! End-to-end tests of the file-backed store and client construction.

use std::fs;

use proxy_config_client::models::{
    Backend, BackendSwitchingRule, Bind, Frontend, HttpRequestRule, HttpRuleType, RuleParent,
    Server,
};
use proxy_config_client::store::{ConfigurationStore, FileStore, StoreError, StoreParams};
use proxy_config_client::{
    BackendAdmin, Client, ClientError, ClientParams, FrontendAdmin, TransactionLifecycle,
};

mod common;

use common::{socket_path, start_fake_runtime, temp_store};

#[test]
fn test_full_lifecycle_survives_reopen() {
    let (dir, store) = temp_store("true");
    assert_eq!(store.version().unwrap(), 1);

    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("web")).unwrap();
    store
        .create_server(&txn.id, "web", &Server::new("s1", "10.0.0.1", 8080))
        .unwrap();
    let mut frontend = Frontend::new("public");
    frontend.default_backend = Some("web".into());
    store.create_frontend(&txn.id, &frontend).unwrap();
    store
        .create_bind(&txn.id, "public", &Bind::new("http", "0.0.0.0", 80))
        .unwrap();
    store
        .create_switching_rule(&txn.id, "public", &BackendSwitchingRule::new("web").when("is_api"))
        .unwrap();

    // Staged changes are invisible until commit.
    assert!(store.committed().backends.is_empty());
    assert_eq!(store.commit_transaction(&txn.id).unwrap(), 2);
    assert_eq!(store.open_transactions(), 0);
    assert!(!store.transaction_dir().join(format!("{}.toml", txn.id)).exists());
    drop(store);

    let reopened = FileStore::open(StoreParams {
        config_file: dir.path().join("proxy.toml"),
        transaction_dir: Some(dir.path().join("transactions")),
        program: "true".into(),
    })
    .unwrap();
    let committed = reopened.committed();
    assert_eq!(committed.version, 2);
    assert_eq!(committed.backend("web").unwrap().servers[0].port, 8080);
    let public = committed.frontend("public").unwrap();
    assert_eq!(public.binds[0].name, "http");
    assert_eq!(public.switching_rules[0].index, Some(0));
}

#[test]
fn test_delete_keeps_version() {
    let (_dir, store) = temp_store("true");
    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("web")).unwrap();

    store.delete_transaction(&txn.id).unwrap();

    assert_eq!(store.version().unwrap(), 1);
    assert!(store.committed().backends.is_empty());
    assert!(matches!(
        store.delete_transaction(&txn.id),
        Err(StoreError::TransactionNotFound(_))
    ));
}

#[test]
fn test_concurrent_transactions_conflict() {
    let (_dir, store) = temp_store("true");
    let first = store.start_transaction(1).unwrap();
    let second = store.start_transaction(1).unwrap();
    store.create_backend(&first.id, &Backend::new("a")).unwrap();
    store.create_backend(&second.id, &Backend::new("b")).unwrap();

    store.commit_transaction(&first.id).unwrap();
    let err = store.commit_transaction(&second.id).unwrap_err();

    assert!(matches!(err, StoreError::VersionMismatch { base: 1, current: 2 }));
    assert_eq!(store.open_transactions(), 1);
    store.delete_transaction(&second.id).unwrap();
    assert!(store.committed().backend("b").is_none());
}

#[test]
fn test_semantic_validation_quarantines_candidate() {
    let (_dir, store) = temp_store("true");
    let txn = store.start_transaction(1).unwrap();
    let mut frontend = Frontend::new("public");
    frontend.default_backend = Some("nowhere".into());
    store.create_frontend(&txn.id, &frontend).unwrap();

    let err = store.commit_transaction(&txn.id).unwrap_err();

    match err {
        StoreError::Validation(messages) => {
            assert_eq!(messages, vec!["frontend public default_backend nowhere does not exist"])
        }
        other => panic!("expected Validation, got {:?}", other),
    }
    assert_eq!(store.version().unwrap(), 1);
    let failed = store.transaction_dir().join("failed").join(format!("{}.toml", txn.id));
    assert!(failed.exists());
}

#[test]
fn test_check_program_rejects_commit() {
    let (_dir, store) = temp_store("false");
    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("web")).unwrap();

    assert!(matches!(
        store.commit_transaction(&txn.id),
        Err(StoreError::Validation(_))
    ));
    assert_eq!(store.committed().version, 1);
}

#[test]
fn test_io_failure_keeps_staged_changes() {
    let (_dir, store) = temp_store("true");
    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("b1")).unwrap();

    // Candidates cannot be written while the transaction dir is a plain file.
    let txn_dir = store.transaction_dir().to_path_buf();
    fs::remove_dir_all(&txn_dir).unwrap();
    fs::write(&txn_dir, "").unwrap();

    assert!(matches!(
        store.commit_transaction(&txn.id),
        Err(StoreError::Io { .. })
    ));
    assert_eq!(store.open_transactions(), 1);
    assert_eq!(store.backend(&txn.id, "b1").unwrap().name, "b1");
    assert_eq!(store.version().unwrap(), 1);

    fs::remove_file(&txn_dir).unwrap();
    fs::create_dir(&txn_dir).unwrap();
    assert_eq!(store.commit_transaction(&txn.id).unwrap(), 2);
    assert!(store.committed().backend("b1").is_some());
}

#[test]
fn test_client_commit_rejected_by_check_program() {
    let (_dir, store) = temp_store("false");
    let mut client = Client::new(store, common::RecordingRuntime::default());
    client.start_transaction().unwrap();
    let id = client.transaction_id().unwrap().to_string();
    client.backend_create(&Backend::new("web")).unwrap();

    let err = client.commit_transaction().unwrap_err();
    match &err {
        ClientError::Store(StoreError::Validation(messages)) => {
            assert_eq!(err.to_string(), format!("Validation failed: {}", messages.join(", ")))
        }
        other => panic!("expected Validation, got {:?}", other),
    }

    let failed = client.store().transaction_dir().join("failed").join(format!("{}.toml", id));
    assert!(failed.exists());
    assert_eq!(client.store().open_transactions(), 0);
    assert_eq!(client.store().version().unwrap(), 1);

    // The rejected transaction is gone from the store; only dispose recovers.
    assert!(client.is_transaction_active());
    assert!(matches!(
        client.commit_transaction(),
        Err(ClientError::Store(StoreError::TransactionNotFound(missing))) if missing == id
    ));
    client.dispose_transaction();
    client.start_transaction().unwrap();
}

#[test]
fn test_entity_errors() {
    let (_dir, store) = temp_store("true");
    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("web")).unwrap();

    assert!(matches!(
        store.create_backend(&txn.id, &Backend::new("web")),
        Err(StoreError::AlreadyExists { kind: "backend", .. })
    ));
    assert!(matches!(
        store.server(&txn.id, "web", "ghost"),
        Err(StoreError::NotFound { kind: "server", .. })
    ));
    assert!(matches!(
        store.servers(&txn.id, "ghost"),
        Err(StoreError::NotFound { kind: "backend", .. })
    ));
    assert!(matches!(
        store.backends("no-such-transaction"),
        Err(StoreError::TransactionNotFound(_))
    ));
}

#[test]
fn test_rule_indices_follow_position() {
    let (_dir, store) = temp_store("true");
    let txn = store.start_transaction(1).unwrap();
    store.create_backend(&txn.id, &Backend::new("web")).unwrap();
    let parent = RuleParent::Backend("web".into());

    store
        .create_http_request_rule(&txn.id, &parent, &HttpRequestRule::new(HttpRuleType::Allow))
        .unwrap();
    let mut deny = HttpRequestRule::new(HttpRuleType::Deny);
    deny.index = Some(0);
    store.create_http_request_rule(&txn.id, &parent, &deny).unwrap();

    let rules = store.http_request_rules(&txn.id, &parent).unwrap();
    assert_eq!(rules[0].rule_type, HttpRuleType::Deny);
    assert_eq!(rules[1].rule_type, HttpRuleType::Allow);
    assert_eq!(rules[1].index, Some(1));

    store.delete_http_request_rule(&txn.id, &parent, 0).unwrap();
    let remaining = store.http_request_rule(&txn.id, &parent, 0).unwrap();
    assert_eq!(remaining.rule_type, HttpRuleType::Allow);
    assert!(matches!(
        store.delete_http_request_rule(&txn.id, &parent, 5),
        Err(StoreError::IndexOutOfRange { index: 5, len: 1, .. })
    ));
}

#[test]
fn test_client_init_and_commit() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir, "runtime.sock");
    let _received = start_fake_runtime(&socket, |_| String::new());

    let mut params = ClientParams::new(dir.path().join("proxy.toml"), "true", &socket);
    params.transaction_dir = Some(dir.path().join("transactions"));
    let mut client = Client::init(&params).unwrap();

    client.start_transaction().unwrap();
    client.frontend_create(&Frontend::new("public")).unwrap();
    client.backend_create(&Backend::new("web")).unwrap();
    client.commit_transaction().unwrap();

    assert_eq!(client.store().version().unwrap(), 2);
    let content = fs::read_to_string(dir.path().join("proxy.toml")).unwrap();
    assert!(content.contains("version = 2"));
}

#[test]
fn test_client_init_without_runtime_fails() {
    let dir = tempfile::tempdir().unwrap();
    let params = ClientParams::new(
        dir.path().join("proxy.toml"),
        "true",
        dir.path().join("missing.sock"),
    );

    match Client::init(&params) {
        Err(ClientError::Init(source)) => assert!(source.to_string().contains("missing.sock")),
        Err(other) => panic!("expected Init, got {:?}", other),
        Ok(_) => panic!("init should fail without a runtime socket"),
    }
    assert!(!dir.path().join("proxy.toml").exists());
}
