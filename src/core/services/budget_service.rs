//! Budget limits compared against period spend.

use serde::{Deserialize, Serialize};

use crate::domain::{FinanceBook, Period, Transaction};

use super::summary_service::SummaryService;

pub const DEFAULT_ALERT_THRESHOLDS: [f64; 2] = [80.0, 100.0];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    /// No limit assigned (limit of zero).
    Unassigned,
    UnderBudget,
    AtLimit,
    OverBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    /// `min(1, spent / limit)`, or 0 when no limit is set.
    pub progress: f64,
    pub over_budget: bool,
    pub status: BudgetStatus,
}

/// Emitted once when a new expense pushes spend across a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category: String,
    pub threshold_percent: f64,
    pub limit: f64,
    pub spent_before: f64,
    pub spent_after: f64,
}

impl BudgetAlert {
    pub fn is_exceeded(&self) -> bool {
        self.threshold_percent >= 100.0
    }
}

pub struct BudgetService;

impl BudgetService {
    pub fn reconcile(category: impl Into<String>, limit: f64, spent: f64) -> BudgetLine {
        let limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
        let spent = if spent.is_finite() { spent.max(0.0) } else { 0.0 };
        let remaining = limit - spent;
        let progress = if limit > 0.0 {
            (spent / limit).min(1.0)
        } else {
            0.0
        };
        let over_budget = remaining < 0.0;
        let status = if limit <= 0.0 {
            BudgetStatus::Unassigned
        } else if over_budget {
            BudgetStatus::OverBudget
        } else if remaining == 0.0 {
            BudgetStatus::AtLimit
        } else {
            BudgetStatus::UnderBudget
        };
        BudgetLine {
            category: category.into(),
            limit,
            spent,
            remaining,
            progress,
            over_budget,
            status,
        }
    }

    /// One line per budget row, in stored order.
    pub fn reconcile_period(book: &FinanceBook, period: Period) -> Vec<BudgetLine> {
        let aggregate = SummaryService::aggregate_period(&book.transactions, period);
        book.budgets
            .iter()
            .map(|budget| {
                let spent = aggregate
                    .expense_by_category
                    .get(&budget.category)
                    .copied()
                    .unwrap_or(0.0);
                Self::reconcile(budget.category.clone(), budget.amount, spent)
            })
            .collect()
    }

    /// Thresholds (percent of `limit`) crossed going from `before` to `after`.
    pub fn threshold_crossings(
        category: &str,
        limit: f64,
        before: f64,
        after: f64,
        thresholds: &[f64],
    ) -> Vec<BudgetAlert> {
        if !(limit > 0.0) {
            return Vec::new();
        }
        thresholds
            .iter()
            .filter(|threshold| threshold.is_finite() && **threshold > 0.0)
            .filter_map(|threshold| {
                let mark = limit * threshold / 100.0;
                (before < mark && after >= mark).then(|| BudgetAlert {
                    category: category.to_string(),
                    threshold_percent: *threshold,
                    limit,
                    spent_before: before,
                    spent_after: after,
                })
            })
            .collect()
    }

    /// Alerts a not-yet-recorded expense would trigger in its own month.
    pub fn alerts_for_new(
        book: &FinanceBook,
        candidate: &Transaction,
        thresholds: &[f64],
    ) -> Vec<BudgetAlert> {
        if !candidate.is_expense() {
            return Vec::new();
        }
        let Some(budget) = book.budget_for(&candidate.category) else {
            return Vec::new();
        };
        let period = Period::from_date(candidate.date);
        let before = SummaryService::aggregate_period(&book.transactions, period)
            .expense_by_category
            .get(&candidate.category)
            .copied()
            .unwrap_or(0.0);
        let after = before + candidate.effective_amount();
        let alerts =
            Self::threshold_crossings(&candidate.category, budget.amount, before, after, thresholds);
        for alert in &alerts {
            tracing::info!(
                category = %alert.category,
                threshold = alert.threshold_percent,
                "budget threshold crossed"
            );
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, OwnerId, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn progress_is_bounded_and_flags_overspend() {
        for (limit, spent) in [(100.0, 0.0), (100.0, 50.0), (100.0, 100.0), (100.0, 250.0), (0.5, 0.6)] {
            let line = BudgetService::reconcile("Ocio", limit, spent);
            assert!((0.0..=1.0).contains(&line.progress));
            assert_eq!(line.over_budget, spent > limit);
        }
        let over = BudgetService::reconcile("Ocio", 100.0, 130.0);
        assert_eq!(over.remaining, -30.0);
        assert_eq!(over.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn zero_limit_never_divides() {
        let line = BudgetService::reconcile("Salud", 0.0, 40.0);
        assert_eq!(line.progress, 0.0);
        assert_eq!(line.status, BudgetStatus::Unassigned);
        assert!(line.over_budget);
    }

    #[test]
    fn thresholds_fire_only_on_crossing() {
        let thresholds = DEFAULT_ALERT_THRESHOLDS;
        let crossed = BudgetService::threshold_crossings("Ocio", 1000.0, 700.0, 850.0, &thresholds);
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].threshold_percent, 80.0);

        let already_past = BudgetService::threshold_crossings("Ocio", 1000.0, 850.0, 900.0, &thresholds);
        assert!(already_past.is_empty());

        let both = BudgetService::threshold_crossings("Ocio", 1000.0, 100.0, 1200.0, &thresholds);
        assert_eq!(both.len(), 2);
        assert!(both[1].is_exceeded());

        assert!(BudgetService::threshold_crossings("Ocio", 0.0, 0.0, 50.0, &thresholds).is_empty());
    }

    #[test]
    fn alerts_for_new_expense_use_its_month() {
        let owner = OwnerId::new("owner");
        let mut book = FinanceBook::new(owner.clone());
        book.upsert_budget(Budget::new("Ocio", 1000.0));
        let march = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        book.add_transaction(Transaction::new(owner.clone(), TransactionKind::Expense, 750.0, "Ocio", march));
        book.add_transaction(Transaction::new(
            owner.clone(),
            TransactionKind::Expense,
            900.0,
            "Ocio",
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        ));
        let candidate = Transaction::new(owner, TransactionKind::Expense, 100.0, "Ocio", march);
        let alerts = BudgetService::alerts_for_new(&book, &candidate, &DEFAULT_ALERT_THRESHOLDS);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].spent_before, 750.0);
        assert_eq!(alerts[0].spent_after, 850.0);
    }

    #[test]
    fn reconcile_period_reports_each_budget_row() {
        let owner = OwnerId::new("owner");
        let mut book = FinanceBook::new(owner.clone());
        book.upsert_budget(Budget::new("Ocio", 1000.0));
        book.upsert_budget(Budget::new("Salud", 500.0));
        book.add_transaction(Transaction::new(
            owner,
            TransactionKind::Expense,
            200.0,
            "Ocio",
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        ));
        let lines = BudgetService::reconcile_period(&book, Period::new(2025, 3).unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].progress, 0.2);
        assert_eq!(lines[1].spent, 0.0);
        assert_eq!(lines[1].remaining, 500.0);
    }
}
