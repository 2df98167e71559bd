use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    /// Someone owes the owner; counts as an asset.
    OwedToMe,
    /// The owner owes someone; counts as a liability.
    IOwe,
}

/// An informal loan between the owner and another person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub person: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub direction: DebtDirection,
    #[serde(default)]
    pub settled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    pub fn new(person: impl Into<String>, amount: f64, direction: DebtDirection) -> Self {
        Self {
            id: Uuid::new_v4(),
            person: person.into(),
            amount: sanitize_amount(amount),
            direction,
            settled: false,
            note: None,
            updated_at: Utc::now(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.settled
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Debt {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
