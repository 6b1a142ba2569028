//! Integration tests for CollectionView: convergence across bindings.

#[path = "../support/mod.rs"]
mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use procure_store::procurement::{seed_fixtures, ComplaintStatus};
use procure_store::{
    document_id, ChangeKind, Collection, CollectionView, Complaint, Document,
    InMemoryStorage, RecordStore, ViewState,
};
use serde_json::json;
use support::{doc, empty_store};


fn ids(view: &CollectionView<InMemoryStorage>) -> Vec<u64> {
    view.records()
        .unwrap()
        .iter()
        .filter_map(document_id)
        .collect()
}

#[test]
fn sibling_view_sees_create() {
    let store = empty_store();
    let a = CollectionView::bind(&store, Collection::Tenders).unwrap();
    let b = CollectionView::bind(&store, Collection::Tenders).unwrap();

    let created = a.create(doc(json!({"title": "Furniture"}))).unwrap();

    assert_eq!(b.records().unwrap(), vec![created]);
    assert_eq!(a.records().unwrap(), b.records().unwrap());
}

#[test]
fn sibling_views_converge_on_update_and_remove() {
    let store = empty_store();
    let a = CollectionView::bind(&store, Collection::Vendors).unwrap();
    let b = CollectionView::bind(&store, Collection::Vendors).unwrap();

    a.create(doc(json!({"name": "Acme", "status": "pending"}))).unwrap();
    a.create(doc(json!({"name": "Netcore", "status": "pending"}))).unwrap();

    b.update(1, doc(json!({"status": "approved"}))).unwrap();
    assert_eq!(a.records().unwrap()[0]["status"], json!("approved"));

    a.remove(2).unwrap();
    assert_eq!(ids(&b), vec![1]);
    assert_eq!(a.records().unwrap(), b.records().unwrap());
}

#[test]
fn direct_store_mutation_reaches_views() {
    let store = empty_store();
    let view = CollectionView::bind(&store, Collection::Committees).unwrap();

    store
        .create(Collection::Committees, doc(json!({"name": "Opening"})))
        .unwrap();
    assert_eq!(view.len(), 1);
}

#[test]
fn filtered_and_unfiltered_views_share_a_collection() {
    let store =
        RecordStore::with_fixtures(InMemoryStorage::new(), seed_fixtures().unwrap()).unwrap();
    let all = CollectionView::bind(&store, Collection::Complaints).unwrap();
    let mut open = CollectionView::new(&store, Collection::Complaints)
        .with_filter(|doc| doc.get("status") == Some(&json!("open")));
    open.activate().unwrap();

    let open_before = open.len();
    let total_before = all.len();

    let complaint = all
        .create(doc(json!({
            "vendor_id": 2,
            "subject": "Bid security returned late",
            "description": "Bid security was held past the validity period.",
            "status": "open"
        })))
        .unwrap();
    let id = document_id(&complaint).unwrap();

    assert_eq!(open.len(), open_before + 1);
    assert_eq!(all.len(), total_before + 1);

    all.update(id, doc(json!({"status": "resolved"}))).unwrap();
    assert_eq!(open.len(), open_before);

    let typed: Vec<Complaint> = all.records_as().unwrap();
    let resolved = typed.iter().find(|c| c.id == id).unwrap();
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert_eq!(resolved.tender_id, None);
}

#[test]
fn views_on_other_collections_still_reload() {
    let store = empty_store();
    store.create(Collection::Vendors, Document::new()).unwrap();
    let vendors = CollectionView::bind(&store, Collection::Vendors).unwrap();
    let tenders = CollectionView::bind(&store, Collection::Tenders).unwrap();

    tenders.create(Document::new()).unwrap();

    assert_eq!(vendors.len(), 1);
    assert_eq!(tenders.len(), 1);
}

#[test]
fn reset_and_clear_through_a_view_refresh_siblings() {
    let store =
        RecordStore::with_fixtures(InMemoryStorage::new(), seed_fixtures().unwrap()).unwrap();
    let a = CollectionView::bind(&store, Collection::Tenders).unwrap();
    let b = CollectionView::bind(&store, Collection::Tenders).unwrap();
    let seeded = a.len();
    assert!(seeded > 0);

    a.clear().unwrap();
    assert!(a.is_empty());
    assert!(b.is_empty());

    b.reset().unwrap();
    assert_eq!(a.len(), seeded);
    assert_eq!(b.len(), seeded);
}

#[test]
fn deactivated_view_keeps_stale_snapshot_until_reactivated() {
    let store = empty_store();
    let mut view = CollectionView::bind(&store, Collection::Evaluations).unwrap();
    view.create(Document::new()).unwrap();

    view.deactivate().unwrap();
    store.create(Collection::Evaluations, Document::new()).unwrap();
    assert_eq!(view.state(), ViewState::Unbound);
    assert_eq!(ids(&view), vec![1]);

    view.activate().unwrap();
    assert_eq!(ids(&view), vec![1, 2]);
}

#[test]
fn broadcast_reaches_views_and_plain_subscribers_once_per_mutation() {
    let store = empty_store();
    let view = CollectionView::bind(&store, Collection::Tenders).unwrap();

    let creates = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&creates);
    store
        .subscribe(move |change| {
            if change.kind == ChangeKind::Created {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
        .unwrap();

    view.create(Document::new()).unwrap();
    view.update(1, doc(json!({"title": "t"}))).unwrap();

    assert_eq!(creates.load(Ordering::SeqCst), 1);
    assert_eq!(store.subscriber_count(), 2);
}

#[test]
fn views_outlive_store_handles_safely() {
    let store = empty_store();
    let view = CollectionView::bind(&store, Collection::Tenders).unwrap();
    drop(store);

    // The view holds its own handle, so the store stays usable through it.
    view.create(Document::new()).unwrap();
    assert_eq!(view.len(), 1);
}
