//! Property tests: commit-vs-discard is decided only by successful mutations.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proxy_config_client::models::Backend;
use proxy_config_client::store::ConfigurationStore;
use proxy_config_client::{BackendAdmin, RuntimeControl, TransactionLifecycle};

mod common;

use common::recording_client;

#[derive(Debug, Clone)]
enum Op {
    Create(&'static str),
    Delete(&'static str),
    List,
    SetState(&'static str),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let name = prop::sample::select(vec!["a", "b", "c"]);
    prop_oneof![
        name.clone().prop_map(Op::Create),
        name.clone().prop_map(Op::Delete),
        Just(Op::List),
        name.prop_map(Op::SetState),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn commit_path_matches_successful_mutations(
        ops in prop::collection::vec(op_strategy(), 0..12),
    ) {
        let mut client = recording_client();
        client.start_transaction().unwrap();

        let mut present = BTreeSet::new();
        let mut changed = false;
        for op in &ops {
            let dirty_before = client.is_dirty();
            match op {
                Op::Create(name) => {
                    let ok = client.backend_create(&Backend::new(*name)).is_ok();
                    let expected = present.insert(*name);
                    prop_assert_eq!(ok, expected);
                    changed |= ok;
                }
                Op::Delete(name) => {
                    let ok = client.backend_delete(name).is_ok();
                    let expected = present.remove(name);
                    prop_assert_eq!(ok, expected);
                    changed |= ok;
                }
                Op::List => {
                    prop_assert_eq!(client.backends_get().unwrap().len(), present.len());
                    prop_assert_eq!(client.is_dirty(), dirty_before);
                }
                Op::SetState(name) => {
                    client.set_server_state(name, "s1", "drain").unwrap();
                    prop_assert_eq!(client.is_dirty(), dirty_before);
                }
            }
            prop_assert_eq!(client.is_dirty(), changed);
        }

        client.commit_transaction().unwrap();
        let store = client.store();
        prop_assert_eq!(store.commits(), usize::from(changed));
        prop_assert_eq!(store.deletes(), usize::from(!changed));
        prop_assert_eq!(store.inner.version().unwrap(), if changed { 2 } else { 1 });
        prop_assert!(!client.is_transaction_active());
    }
}
