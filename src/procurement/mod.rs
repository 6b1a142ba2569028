//! Procurement records - the collections a tender console works with.

mod fixtures;
mod models;

pub use fixtures::seed_fixtures;
pub use models::{
    Committee, CommitteeRole, Complaint, ComplaintStatus, Evaluation, EvaluationStatus, Tender,
    TenderStatus, Vendor, VendorStatus,
};
