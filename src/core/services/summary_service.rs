//! Period aggregation and the savings/investment allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Budget, CategorySet, FinanceBook, Period, Strategy, Transaction, TransactionKind,
};

/// Sums by kind and expense totals per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub income: f64,
    pub expense: f64,
    /// Only categories with non-zero spend appear.
    pub expense_by_category: BTreeMap<String, f64>,
}

/// Amounts earmarked by the strategy for one income figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub savings_amount: f64,
    pub investment_amount: f64,
}

impl Allocation {
    pub fn from_income(income: f64, strategy: &Strategy) -> Self {
        Self {
            savings_amount: income * strategy.savings_percent / 100.0,
            investment_amount: income * strategy.investment_percent / 100.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.savings_amount + self.investment_amount
    }

    /// `income − savings − investment − expense`. May be negative.
    pub fn available(&self, income: f64, expense: f64) -> f64 {
        income - self.savings_amount - self.investment_amount - expense
    }

    /// `income − savings − investment − Σ limits`. May be negative.
    pub fn available_to_assign(&self, income: f64, budgets_assigned: f64) -> f64 {
        income - self.savings_amount - self.investment_amount - budgets_assigned
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub period: Period,
    pub income: f64,
    pub expense: f64,
    pub expense_by_category: BTreeMap<String, f64>,
    pub savings_amount: f64,
    pub investment_amount: f64,
    pub total_budgets_assigned: f64,
    pub available: f64,
    pub available_to_assign: f64,
    pub historical_savings_total: f64,
    pub historical_investment_total: f64,
}

/// One slice of the expense chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub emoji: Option<String>,
    pub spent: f64,
    pub share_percent: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn aggregate<'a, I>(transactions: I) -> Aggregate
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Vec::new();
        let mut expense = Vec::new();
        let mut by_category: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for txn in transactions {
            let amount = txn.effective_amount();
            match txn.kind {
                TransactionKind::Income => income.push(amount),
                TransactionKind::Expense => {
                    expense.push(amount);
                    by_category
                        .entry(txn.category.clone())
                        .or_default()
                        .push(amount);
                }
            }
        }
        Aggregate {
            income: canonical_sum(income),
            expense: canonical_sum(expense),
            expense_by_category: by_category
                .into_iter()
                .map(|(category, amounts)| (category, canonical_sum(amounts)))
                .filter(|(_, total)| *total > 0.0)
                .collect(),
        }
    }

    pub fn aggregate_period(transactions: &[Transaction], period: Period) -> Aggregate {
        Self::aggregate(transactions.iter().filter(|txn| period.contains(txn.date)))
    }

    pub fn total_budgets_assigned(budgets: &[Budget]) -> f64 {
        canonical_sum(budgets.iter().map(|budget| budget.amount.max(0.0)).collect())
    }

    pub fn monthly_stats(book: &FinanceBook, period: Period) -> MonthlyStats {
        let aggregate = Self::aggregate_period(&book.transactions, period);
        let allocation = Allocation::from_income(aggregate.income, &book.strategy);
        let total_budgets_assigned = Self::total_budgets_assigned(&book.budgets);

        let historical_income = Self::aggregate(&book.transactions).income;
        let historical = Allocation::from_income(historical_income, &book.strategy);

        tracing::debug!(
            period = %period,
            income = aggregate.income,
            expense = aggregate.expense,
            "computed monthly stats"
        );

        MonthlyStats {
            period,
            income: aggregate.income,
            expense: aggregate.expense,
            available: allocation.available(aggregate.income, aggregate.expense),
            available_to_assign: allocation
                .available_to_assign(aggregate.income, total_budgets_assigned),
            expense_by_category: aggregate.expense_by_category,
            savings_amount: allocation.savings_amount,
            investment_amount: allocation.investment_amount,
            total_budgets_assigned,
            historical_savings_total: historical.savings_amount,
            historical_investment_total: historical.investment_amount,
        }
    }

    /// Expense chart data in category-list order; unknown categories follow alphabetically.
    pub fn category_breakdown(stats: &MonthlyStats, categories: &CategorySet) -> Vec<CategoryShare> {
        let total: f64 = stats.expense_by_category.values().sum();
        let share = |spent: f64| {
            if total > 0.0 {
                spent / total * 100.0
            } else {
                0.0
            }
        };

        let mut shares: Vec<CategoryShare> = categories
            .expense
            .iter()
            .filter_map(|entry| {
                let spent = stats.expense_by_category.get(&entry.name).copied()?;
                Some(CategoryShare {
                    category: entry.name.clone(),
                    emoji: entry.emoji.clone(),
                    spent,
                    share_percent: share(spent),
                })
            })
            .collect();

        shares.extend(
            stats
                .expense_by_category
                .iter()
                .filter(|(name, _)| !categories.contains(TransactionKind::Expense, name))
                .map(|(name, spent)| CategoryShare {
                    category: name.clone(),
                    emoji: None,
                    spent: *spent,
                    share_percent: share(*spent),
                }),
        );
        shares.retain(|entry| entry.spent > 0.0);
        shares
    }
}

/// Sums in ascending order so the result does not depend on input order.
pub(crate) fn canonical_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}
