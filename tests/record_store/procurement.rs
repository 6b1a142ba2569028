//! Typed access over the procurement fixtures.

use procure_store::procurement::{seed_fixtures, TenderStatus, VendorStatus};
use procure_store::{Evaluation, InMemoryStorage, Record, RecordStore, Tender, Vendor};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct NewVendor<'a> {
    name: &'a str,
    registration_number: &'a str,
    email: &'a str,
    category: &'a str,
    status: VendorStatus,
}

fn seeded() -> RecordStore<InMemoryStorage> {
    RecordStore::with_fixtures(InMemoryStorage::new(), seed_fixtures().unwrap()).unwrap()
}

#[test]
fn seeded_records_decode_as_typed_models() {
    let store = seeded();

    let tenders = store.records::<Tender>().all().unwrap();
    assert_eq!(tenders.len(), store.records::<Tender>().count().unwrap());

    let open: Vec<_> = store
        .records::<Tender>()
        .find(&|t| t.is_open())
        .unwrap();
    assert!(open.iter().all(|t| t.status == TenderStatus::Published));
}

#[test]
fn vendor_registration_and_approval() {
    let store = seeded();
    let vendors = store.records::<Vendor>();
    let existing = vendors.count().unwrap() as u64;

    let vendor = vendors
        .create(&NewVendor {
            name: "Brightline Logistics",
            registration_number: "RC-998877",
            email: "hello@brightline.example",
            category: "services",
            status: VendorStatus::Pending,
        })
        .unwrap();
    assert_eq!(vendor.id(), existing + 1);

    let approved = vendors
        .update(vendor.id, &json!({"status": "approved"}))
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, VendorStatus::Approved);
    assert_eq!(approved.email, "hello@brightline.example");
}

#[test]
fn evaluation_totals() {
    let store = seeded();
    let evaluation = store
        .records::<Evaluation>()
        .find_one(&|e| e.tender_id == 2)
        .unwrap()
        .unwrap();
    assert_eq!(
        evaluation.total_score(),
        evaluation.technical_score + evaluation.financial_score
    );
}

#[test]
fn reset_restores_seeded_tenders() {
    let store = seeded();
    let before = store.records::<Tender>().all().unwrap();

    store.records::<Tender>().delete(1).unwrap();
    store
        .records::<Tender>()
        .update(2, &json!({"status": "cancelled"}))
        .unwrap();
    store.reset().unwrap();

    assert_eq!(store.records::<Tender>().all().unwrap(), before);
}
