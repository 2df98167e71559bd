//! Income and expense records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Direction of a movement. The stored amount is always a magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    #[serde(rename = "GASTO", alias = "EXPENSE")]
    Expense,
    #[serde(rename = "INGRESO", alias = "INCOME")]
    Income,
}

impl TransactionKind {
    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "GASTO",
            TransactionKind::Income => "INGRESO",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "user_id", alias = "owner_id")]
    pub owner_id: OwnerId,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(rename = "type", alias = "kind")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        owner_id: OwnerId,
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            amount: sanitize_amount(amount),
            kind,
            category: category.into(),
            note: None,
            date,
            created_at: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let trimmed = note.trim();
        self.note = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount with non-finite or negative values treated as zero.
    pub fn effective_amount(&self) -> f64 {
        sanitize_amount(self.amount)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Partial edit applied to an existing transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn has_effect(&self) -> bool {
        self.amount.is_some() || self.category.is_some() || self.note.is_some() || self.date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_rows() {
        let row = r#"{
            "id": "6f1c7a4e-58f4-4f7c-9d2f-6f0a6c1d2b3e",
            "user_id": "owner-1",
            "amount": "12.500",
            "type": "GASTO",
            "category": "Vivienda",
            "note": "alquiler",
            "date": "2025-03-01T00:00:00.000Z",
            "created_at": "2025-03-01T10:15:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(row).unwrap();
        assert_eq!(txn.amount, 12500.0);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(txn.owner_id.as_str(), "owner-1");
    }

    #[test]
    fn english_kind_aliases_are_accepted() {
        let kind: TransactionKind = serde_json::from_str("\"INCOME\"").unwrap();
        assert_eq!(kind, TransactionKind::Income);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"INGRESO\"");
    }

    #[test]
    fn blank_notes_are_dropped() {
        let txn = Transaction::new(
            OwnerId::new("o"),
            TransactionKind::Expense,
            -20.0,
            "Ocio",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .with_note("   ");
        assert_eq!(txn.note, None);
        assert_eq!(txn.amount, 0.0);
    }

    #[test]
    fn stored_negative_amount_degrades_to_zero() {
        let row = r#"{
            "id": "6f1c2d3e-0000-4000-8000-000000000002",
            "user_id": "owner-1",
            "type": "GASTO",
            "amount": -500,
            "category": "Comida",
            "date": "2025-03-05",
            "created_at": "2025-03-05T09:00:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(row).unwrap();
        assert_eq!(txn.amount, 0.0);
        assert_eq!(txn.effective_amount(), 0.0);
    }
}
