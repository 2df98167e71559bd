//! Month-over-month series and per-category comparisons.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Period, Transaction};

use super::summary_service::{canonical_sum, SummaryService};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub period: Period,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: String,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    /// Relative change; `None` when nothing was spent the previous month.
    pub change_percent: Option<f64>,
}

pub struct TrendService;

impl TrendService {
    /// `months` points ending at `end`, oldest first. Empty months are zeros.
    pub fn monthly_series(transactions: &[Transaction], end: Period, months: u32) -> Vec<MonthlyPoint> {
        (0..months as i32)
            .rev()
            .map(|back| {
                let period = end.shift(-back);
                let aggregate = SummaryService::aggregate_period(transactions, period);
                MonthlyPoint {
                    period,
                    income: aggregate.income,
                    expense: aggregate.expense,
                    balance: aggregate.income - aggregate.expense,
                }
            })
            .collect()
    }

    pub fn average_monthly_expense(series: &[MonthlyPoint]) -> f64 {
        if series.is_empty() {
            return 0.0;
        }
        canonical_sum(series.iter().map(|point| point.expense).collect()) / series.len() as f64
    }

    /// Expense categories of `period` or the month before, largest change first.
    pub fn category_deltas(transactions: &[Transaction], period: Period) -> Vec<CategoryDelta> {
        let current = SummaryService::aggregate_period(transactions, period).expense_by_category;
        let previous =
            SummaryService::aggregate_period(transactions, period.previous()).expense_by_category;
        let categories: BTreeSet<&String> = current.keys().chain(previous.keys()).collect();

        let mut deltas: Vec<CategoryDelta> = categories
            .into_iter()
            .map(|category| {
                let now = current.get(category).copied().unwrap_or(0.0);
                let before = previous.get(category).copied().unwrap_or(0.0);
                let change = now - before;
                CategoryDelta {
                    category: category.clone(),
                    current: now,
                    previous: before,
                    change,
                    change_percent: (before > 0.0).then(|| change / before * 100.0),
                }
            })
            .collect();
        deltas.sort_by(|a, b| {
            b.change
                .abs()
                .total_cmp(&a.change.abs())
                .then_with(|| a.category.cmp(&b.category))
        });
        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerId, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, amount: f64, category: &str, y: i32, m: u32, d: u32) -> Transaction {
        Transaction::new(
            OwnerId::new("owner"),
            kind,
            amount,
            category,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn series_covers_empty_months_across_year_boundary() {
        let transactions = vec![
            txn(TransactionKind::Income, 1000.0, "Sueldo", 2024, 11, 1),
            txn(TransactionKind::Expense, 300.0, "Ocio", 2024, 11, 9),
            txn(TransactionKind::Expense, 600.0, "Ocio", 2025, 1, 9),
        ];
        let end = Period::new(2025, 1).unwrap();
        let series = TrendService::monthly_series(&transactions, end, 3);

        let periods: Vec<String> = series.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-11", "2024-12", "2025-01"]);
        assert_eq!(series[0].balance, 700.0);
        assert_eq!(series[1].expense, 0.0);
        assert_eq!(series[2].balance, -600.0);
        assert_eq!(TrendService::average_monthly_expense(&series), 300.0);
        assert_eq!(TrendService::average_monthly_expense(&[]), 0.0);
    }

    #[test]
    fn deltas_compare_against_previous_month() {
        let transactions = vec![
            txn(TransactionKind::Expense, 200.0, "Ocio", 2025, 2, 3),
            txn(TransactionKind::Expense, 500.0, "Ocio", 2025, 3, 3),
            txn(TransactionKind::Expense, 80.0, "Salud", 2025, 2, 3),
            txn(TransactionKind::Expense, 40.0, "Transporte", 2025, 3, 3),
        ];
        let deltas = TrendService::category_deltas(&transactions, Period::new(2025, 3).unwrap());

        assert_eq!(deltas[0].category, "Ocio");
        assert_eq!(deltas[0].change, 300.0);
        assert_eq!(deltas[0].change_percent, Some(150.0));
        let salud = deltas.iter().find(|d| d.category == "Salud").unwrap();
        assert_eq!(salud.change_percent, Some(-100.0));
        let transporte = deltas.iter().find(|d| d.category == "Transporte").unwrap();
        assert_eq!(transporte.change_percent, None);
    }
}
