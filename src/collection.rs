//! The closed set of collections the store knows about.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A named collection of records.
///
/// The set is fixed at compile time, so a store can never be asked for a
/// collection it does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Committees,
    Tenders,
    Vendors,
    Evaluations,
    Complaints,
}

impl Collection {
    /// Every collection, in persisted-document order.
    pub const ALL: [Collection; 5] = [
        Collection::Committees,
        Collection::Tenders,
        Collection::Vendors,
        Collection::Evaluations,
        Collection::Complaints,
    ];

    /// The key used for this collection in the persisted document.
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Committees => "committees",
            Collection::Tenders => "tenders",
            Collection::Vendors => "vendors",
            Collection::Evaluations => "evaluations",
            Collection::Complaints => "complaints",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}
