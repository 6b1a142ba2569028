use crate::error::StoreError;
use crate::fixtures::Fixtures;

use super::models::*;

/// Seed data a fresh console starts with.
pub fn seed_fixtures() -> Result<Fixtures, StoreError> {
    Fixtures::empty()
        .with_records(&committees())?
        .with_records(&tenders())?
        .with_records(&vendors())?
        .with_records(&evaluations())?
        .with_records(&complaints())
}

fn committees() -> Vec<Committee> {
    vec![
        Committee {
            id: 1,
            name: "Technical Evaluation Committee".into(),
            role: CommitteeRole::Technical,
            chairperson: "A. Mensah".into(),
            members: vec!["R. Osei".into(), "L. Boateng".into()],
        },
        Committee {
            id: 2,
            name: "Financial Evaluation Committee".into(),
            role: CommitteeRole::Financial,
            chairperson: "K. Owusu".into(),
            members: vec!["E. Asante".into()],
        },
    ]
}

fn tenders() -> Vec<Tender> {
    vec![
        Tender {
            id: 1,
            reference: "TND-2024-001".into(),
            title: "Supply of office furniture".into(),
            category: "goods".into(),
            estimated_value: 4_500_000,
            status: TenderStatus::Published,
            closing_date: "2024-09-30".into(),
            committee_id: Some(1),
        },
        Tender {
            id: 2,
            reference: "TND-2024-002".into(),
            title: "Network infrastructure upgrade".into(),
            category: "works".into(),
            estimated_value: 12_000_000,
            status: TenderStatus::UnderEvaluation,
            closing_date: "2024-08-15".into(),
            committee_id: Some(1),
        },
        Tender {
            id: 3,
            reference: "TND-2024-003".into(),
            title: "Audit services".into(),
            category: "services".into(),
            estimated_value: 2_000_000,
            status: TenderStatus::Draft,
            closing_date: "2024-11-01".into(),
            committee_id: None,
        },
    ]
}

fn vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: 1,
            name: "Acme Supplies Ltd".into(),
            registration_number: "RC-100234".into(),
            email: "bids@acme.example".into(),
            category: "goods".into(),
            status: VendorStatus::Approved,
        },
        Vendor {
            id: 2,
            name: "Netcore Systems".into(),
            registration_number: "RC-200871".into(),
            email: "tenders@netcore.example".into(),
            category: "works".into(),
            status: VendorStatus::Approved,
        },
        Vendor {
            id: 3,
            name: "Ledger & Co".into(),
            registration_number: "RC-310552".into(),
            email: "office@ledger.example".into(),
            category: "services".into(),
            status: VendorStatus::Pending,
        },
    ]
}

fn evaluations() -> Vec<Evaluation> {
    vec![Evaluation {
        id: 1,
        tender_id: 2,
        vendor_id: 2,
        evaluator: "R. Osei".into(),
        technical_score: 62,
        financial_score: 25,
        status: EvaluationStatus::Submitted,
    }]
}

fn complaints() -> Vec<Complaint> {
    vec![Complaint {
        id: 1,
        vendor_id: 1,
        tender_id: Some(2),
        subject: "Clarification on evaluation criteria".into(),
        description: "The weighting of the financial score was not published.".into(),
        status: ComplaintStatus::Open,
    }]
}
