//! Integration tests for RecordStore: persistence, seeding, id assignment.

#[path = "../support/mod.rs"]
mod support;

mod procurement;

use procure_store::{
    Collection, Document, FileStorage, Fixtures, InMemoryStorage, RecordStore, Storage,
    StoreConfig, StoreState,
};
use serde_json::{json, Value};
use support::{doc, empty_store};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}


#[test]
fn tender_walkthrough() {
    let store = empty_store();

    let x = store.create(Collection::Tenders, doc(json!({"title": "X"}))).unwrap();
    assert_eq!(Value::Object(x), json!({"id": 1, "title": "X"}));

    let y = store.create(Collection::Tenders, doc(json!({"title": "Y"}))).unwrap();
    assert_eq!(Value::Object(y), json!({"id": 2, "title": "Y"}));

    assert!(store.delete(Collection::Tenders, 1).unwrap());
    assert_eq!(
        store.get_all(Collection::Tenders).unwrap(),
        vec![doc(json!({"id": 2, "title": "Y"}))]
    );

    let z = store.create(Collection::Tenders, doc(json!({"title": "Z"}))).unwrap();
    assert_eq!(Value::Object(z), json!({"id": 3, "title": "Z"}));

    let before = store.get_all(Collection::Tenders).unwrap();
    assert!(store
        .update(Collection::Tenders, 99, doc(json!({"title": "Q"})))
        .unwrap()
        .is_none());
    assert_eq!(store.get_all(Collection::Tenders).unwrap(), before);
}

#[test]
fn created_record_survives_reopen() {
    let storage = InMemoryStorage::new();
    let created = {
        let store = RecordStore::with_fixtures(storage.clone(), Fixtures::empty()).unwrap();
        store
            .create(
                Collection::Vendors,
                doc(json!({"name": "Acme", "tags": ["goods"], "rating": 4.5})),
            )
            .unwrap()
    };

    let reopened = RecordStore::with_fixtures(storage, Fixtures::empty()).unwrap();
    let all = reopened.get_all(Collection::Vendors).unwrap();
    assert_eq!(all, vec![created]);
}

#[test]
fn file_storage_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new().with_storage_key("console");

    {
        let store = RecordStore::open(
            FileStorage::open(dir.path()).unwrap(),
            Fixtures::empty(),
            config.clone(),
        )
        .unwrap();
        store
            .create(Collection::Complaints, doc(json!({"subject": "late award"})))
            .unwrap();
        store
            .update(Collection::Complaints, 1, doc(json!({"status": "open"})))
            .unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("console.json")).unwrap();
    let persisted: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        persisted["complaints"],
        json!([{"id": 1, "subject": "late award", "status": "open"}])
    );
    assert_eq!(persisted["tenders"], json!([]));

    let reopened = RecordStore::open(
        FileStorage::open(dir.path()).unwrap(),
        Fixtures::empty(),
        config,
    )
    .unwrap();
    let complaint = reopened.get_by_id(Collection::Complaints, 1).unwrap().unwrap();
    assert_eq!(complaint["status"], json!("open"));
}

#[test]
fn first_open_seeds_and_persists_fixtures() {
    let storage = InMemoryStorage::new();
    let fixtures = Fixtures::empty().with(
        Collection::Committees,
        vec![doc(json!({"id": 1, "name": "Technical"}))],
    );

    let store = RecordStore::with_fixtures(storage.clone(), fixtures).unwrap();
    assert_eq!(store.count(Collection::Committees).unwrap(), 1);

    let json = storage.get_item(store.storage_key()).unwrap().unwrap();
    let state = StoreState::from_json(&json).unwrap();
    assert_eq!(state.records(Collection::Committees).len(), 1);
}

#[test]
fn persisted_state_wins_over_fixtures() {
    let storage = InMemoryStorage::new();
    storage
        .set_item("procurement_store", r#"{"vendors":[{"id":5,"name":"Kept"}]}"#)
        .unwrap();
    let fixtures = Fixtures::empty().with(
        Collection::Vendors,
        vec![doc(json!({"id": 1, "name": "Fixture"}))],
    );

    let store = RecordStore::with_fixtures(storage, fixtures).unwrap();
    let vendors = store.get_all(Collection::Vendors).unwrap();
    assert_eq!(vendors, vec![doc(json!({"id": 5, "name": "Kept"}))]);

    let next = store.create(Collection::Vendors, Document::new()).unwrap();
    assert_eq!(next["id"], json!(6));
}

#[test]
fn stores_with_different_keys_are_independent() {
    let storage = InMemoryStorage::new();
    let a = RecordStore::open(
        storage.clone(),
        Fixtures::empty(),
        StoreConfig::new().with_storage_key("a"),
    )
    .unwrap();
    let b = RecordStore::open(
        storage.clone(),
        Fixtures::empty(),
        StoreConfig::new().with_storage_key("b"),
    )
    .unwrap();

    a.create(Collection::Tenders, Document::new()).unwrap();
    assert_eq!(b.count(Collection::Tenders).unwrap(), 0);
    assert_eq!(storage.len(), 2);
}

#[test]
fn cleared_store_reopens_empty() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let fixtures = Fixtures::empty().with(Collection::Tenders, vec![doc(json!({"id": 1}))]);

    let store =
        RecordStore::with_fixtures(FileStorage::open(dir.path()).unwrap(), fixtures.clone())
            .unwrap();
    store.clear().unwrap();
    drop(store);

    let reopened =
        RecordStore::with_fixtures(FileStorage::open(dir.path()).unwrap(), fixtures).unwrap();
    assert!(reopened.snapshot_state().unwrap().is_empty());

    reopened.reset().unwrap();
    assert_eq!(reopened.count(Collection::Tenders).unwrap(), 1);
}
