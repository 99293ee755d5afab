//! Integration tests for the JSON document store

use proptest::prelude::*;
use serde_json::{json, Value};

use twitter_bot_api::{Collection, DocumentState, DocumentStore};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

#[tokio::test]
async fn files_are_named_after_collections() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = DocumentStore::open(temp.path());
    store.initialize().await.expect("initialize");

    for collection in Collection::ALL {
        assert!(temp.path().join(collection.file_name()).exists());
    }
}

#[tokio::test]
async fn inspect_distinguishes_missing_from_corrupted() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = DocumentStore::open(temp.path());

    assert_eq!(store.inspect(Collection::Responses).await, DocumentState::Missing);

    std::fs::write(temp.path().join("responses.json"), "[{").expect("write");
    assert!(matches!(
        store.inspect(Collection::Responses).await,
        DocumentState::Corrupted(_)
    ));

    std::fs::write(temp.path().join("responses.json"), "[]").expect("write");
    assert_eq!(
        store.inspect(Collection::Responses).await,
        DocumentState::Present(json!([]))
    );
}

#[tokio::test]
async fn save_creates_missing_data_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data_dir = temp.path().join("nested").join("data");
    let store = DocumentStore::open(&data_dir);

    store
        .save(Collection::Logs, &json!([]))
        .await
        .expect("save");

    assert!(data_dir.join("logs.json").exists());
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 çğıöşü@#]{0,20}".prop_map(Value::String),
    ]
}

fn json_record() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-zA-Z]{1,10}", json_leaf(), 0..6)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn save_then_load_round_trips(records in prop::collection::vec(json_record(), 0..8)) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::open(temp.path());
        let value = Value::Array(records);

        let loaded = runtime().block_on(async {
            store.save(Collection::Accounts, &value).await.expect("save");
            store.load(Collection::Accounts).await
        });

        prop_assert_eq!(loaded, value);
    }
}
