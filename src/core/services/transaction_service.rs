//! Validated create/edit/delete for transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::budget_service::{BudgetAlert, BudgetService};
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{FinanceBook, Transaction, TransactionKind, TransactionPatch};

/// User input for a new transaction, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub id: Uuid,
    /// Budget thresholds crossed by this expense, if any.
    pub alerts: Vec<BudgetAlert>,
}

pub struct TransactionService;

impl TransactionService {
    /// Validates and inserts a draft, reporting budget thresholds it crosses.
    pub fn record(
        book: &mut FinanceBook,
        draft: TransactionDraft,
        thresholds: &[f64],
    ) -> ServiceResult<Recorded> {
        Self::validate_amount(draft.amount)?;
        let category = Self::validate_category(book, draft.kind, &draft.category)?;

        let mut transaction =
            Transaction::new(book.owner_id.clone(), draft.kind, draft.amount, category, draft.date);
        if let Some(note) = draft.note {
            transaction = transaction.with_note(note);
        }

        let alerts = BudgetService::alerts_for_new(book, &transaction, thresholds);
        let id = book.add_transaction(transaction);
        tracing::debug!(transaction = %id, alerts = alerts.len(), "recorded transaction");
        Ok(Recorded { id, alerts })
    }

    /// Applies a partial edit. Nothing changes when validation fails.
    pub fn edit(book: &mut FinanceBook, id: Uuid, patch: TransactionPatch) -> ServiceResult<()> {
        let kind = book
            .transaction(id)
            .map(|txn| txn.kind)
            .ok_or_else(|| ServiceError::NotFound(format!("transaction {id}")))?;
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        let category = patch
            .category
            .as_deref()
            .map(|category| Self::validate_category(book, kind, category))
            .transpose()?;

        let txn = book
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("transaction {id}")))?;
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(category) = category {
            txn.category = category;
        }
        if let Some(note) = patch.note {
            txn.note = note
                .map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty());
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        book.touch();
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn delete(book: &mut FinanceBook, id: Uuid) -> ServiceResult<Transaction> {
        book.remove_transaction(id)
            .ok_or_else(|| ServiceError::NotFound(format!("transaction {id}")))
    }

    fn validate_amount(amount: f64) -> ServiceResult<()> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(())
        } else {
            Err(ServiceError::Invalid(format!("Invalid amount `{amount}`")))
        }
    }

    fn validate_category(
        book: &FinanceBook,
        kind: TransactionKind,
        category: &str,
    ) -> ServiceResult<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ServiceError::Invalid("Category is required".into()));
        }
        if !book.categories.contains(kind, category) {
            return Err(ServiceError::Invalid(format!(
                "Category `{category}` is not a {} category",
                kind.to_string().to_lowercase()
            )));
        }
        Ok(category.to_string())
    }
}
