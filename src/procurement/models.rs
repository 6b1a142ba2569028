use serde::{Deserialize, Serialize};

use crate::{Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitteeRole {
    Technical,
    Financial,
    Opening,
}

/// A tender committee and its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = Committees)]
pub struct Committee {
    pub id: RecordId,
    pub name: String,
    pub role: CommitteeRole,
    pub chairperson: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    Draft,
    Published,
    UnderEvaluation,
    Awarded,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = Tenders)]
pub struct Tender {
    pub id: RecordId,
    pub reference: String,
    pub title: String,
    pub category: String,
    /// Estimated contract value in minor currency units.
    pub estimated_value: u64,
    pub status: TenderStatus,
    pub closing_date: String,
    #[serde(default)]
    pub committee_id: Option<RecordId>,
}

impl Tender {
    /// Whether vendors may still submit bids.
    pub fn is_open(&self) -> bool {
        self.status == TenderStatus::Published
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Pending,
    Approved,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Vendor {
    pub id: RecordId,
    pub name: String,
    pub registration_number: String,
    pub email: String,
    pub category: String,
    pub status: VendorStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    InProgress,
    Submitted,
    Approved,
}

/// One vendor's scores on one tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Evaluation {
    pub id: RecordId,
    pub tender_id: RecordId,
    pub vendor_id: RecordId,
    pub evaluator: String,
    pub technical_score: u32,
    pub financial_score: u32,
    pub status: EvaluationStatus,
}

impl Evaluation {
    pub fn total_score(&self) -> u32 {
        self.technical_score + self.financial_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    UnderReview,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Complaint {
    pub id: RecordId,
    pub vendor_id: RecordId,
    #[serde(default)]
    pub tender_id: Option<RecordId>,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
}
