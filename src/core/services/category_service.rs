use crate::domain::{CategoryEntry, FinanceBook, TransactionKind};

use super::{ServiceError, ServiceResult};

/// Counts of records updated by a category rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub transactions: usize,
    pub budgets: usize,
    pub recurring: usize,
    pub bills: usize,
}

pub struct CategoryService;

impl CategoryService {
    pub fn add(
        book: &mut FinanceBook,
        kind: TransactionKind,
        name: &str,
        emoji: Option<&str>,
    ) -> ServiceResult<()> {
        let name = Self::validate_name(book, kind, None, name)?;
        let mut entry = CategoryEntry::new(name);
        if let Some(emoji) = emoji.map(str::trim).filter(|emoji| !emoji.is_empty()) {
            entry = entry.with_emoji(emoji);
        }
        book.categories.entries_mut(kind).push(entry);
        book.touch();
        Ok(())
    }

    /// Removes a category from the list. Existing transactions keep the label.
    pub fn remove(book: &mut FinanceBook, kind: TransactionKind, name: &str) -> ServiceResult<()> {
        let entries = book.categories.entries_mut(kind);
        let before = entries.len();
        entries.retain(|entry| entry.name != name);
        if entries.len() == before {
            return Err(ServiceError::NotFound(format!("category `{name}`")));
        }
        book.touch();
        Ok(())
    }

    pub fn set_emoji(
        book: &mut FinanceBook,
        kind: TransactionKind,
        name: &str,
        emoji: Option<&str>,
    ) -> ServiceResult<()> {
        let entry = book
            .categories
            .entries_mut(kind)
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ServiceError::NotFound(format!("category `{name}`")))?;
        entry.emoji = emoji
            .map(str::trim)
            .filter(|emoji| !emoji.is_empty())
            .map(str::to_string);
        book.touch();
        Ok(())
    }

    /// Renames a category and rewrites every record that references it.
    pub fn rename(
        book: &mut FinanceBook,
        kind: TransactionKind,
        old: &str,
        new: &str,
    ) -> ServiceResult<RenameReport> {
        if !book.categories.contains(kind, old) {
            return Err(ServiceError::NotFound(format!("category `{old}`")));
        }
        let new = Self::validate_name(book, kind, Some(old), new)?;
        if new == old {
            return Ok(RenameReport::default());
        }

        let mut report = RenameReport::default();
        for entry in book.categories.entries_mut(kind) {
            if entry.name == old {
                entry.name = new.clone();
            }
        }
        for txn in book
            .transactions
            .iter_mut()
            .filter(|txn| txn.kind == kind && txn.category == old)
        {
            txn.category = new.clone();
            report.transactions += 1;
        }
        for rule in book
            .recurring
            .iter_mut()
            .filter(|rule| rule.kind == kind && rule.category == old)
        {
            rule.category = new.clone();
            report.recurring += 1;
        }
        if kind == TransactionKind::Expense {
            if book.budgets.iter().any(|budget| budget.category == old) {
                book.budgets.retain(|budget| budget.category != new);
            }
            for budget in book.budgets.iter_mut().filter(|budget| budget.category == old) {
                budget.category = new.clone();
                report.budgets += 1;
            }
            for bill in book.bills.iter_mut().filter(|bill| bill.category == old) {
                bill.category = new.clone();
                report.bills += 1;
            }
        }
        book.touch();

        tracing::info!(
            from = old,
            to = %new,
            transactions = report.transactions,
            budgets = report.budgets,
            "renamed category"
        );
        Ok(report)
    }

    fn validate_name(
        book: &FinanceBook,
        kind: TransactionKind,
        exclude: Option<&str>,
        candidate: &str,
    ) -> ServiceResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        let normalized = trimmed.to_lowercase();
        let duplicate = book.categories.names(kind).any(|name| {
            name.to_lowercase() == normalized && exclude.map_or(true, |skip| name != skip)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                trimmed
            )))
        } else {
            Ok(trimmed.to_string())
        }
    }
}
