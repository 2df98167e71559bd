//! Burn-rate projection for the month in progress.
//!
//! The estimate is a plain linear extrapolation of the average daily spend so
//! far; it has no smoothing and ignores seasonality or known upcoming bills.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::core::clock::Clock;
use crate::domain::{FinanceBook, Period};

use super::summary_service::{Allocation, SummaryService};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub expense_so_far: f64,
    pub income: f64,
    /// Day of month "today" (1-based); doubles as the count of elapsed days.
    pub day_of_month: u32,
    pub days_in_month: u32,
    pub allocation: Allocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub daily_rate: f64,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub projected_expense: f64,
    pub projected_available: f64,
}

pub struct ForecastService;

impl ForecastService {
    /// Returns `None` when there is not enough signal to extrapolate.
    pub fn project(input: ProjectionInput) -> Option<Projection> {
        if input.day_of_month == 0 || !(input.expense_so_far > 0.0) || !(input.income > 0.0) {
            return None;
        }
        let days_elapsed = input.day_of_month.min(input.days_in_month.max(1));
        let days_remaining = input.days_in_month.saturating_sub(days_elapsed);
        let daily_rate = input.expense_so_far / days_elapsed as f64;
        let projected_expense =
            (input.expense_so_far + daily_rate * days_remaining as f64).round();
        let projected_available = input.income
            - projected_expense
            - input.allocation.savings_amount
            - input.allocation.investment_amount;
        Some(Projection {
            daily_rate,
            days_elapsed,
            days_remaining,
            projected_expense,
            projected_available,
        })
    }

    /// Projection for `period`, only when it is the clock's current month.
    pub fn project_period(
        book: &FinanceBook,
        period: Period,
        clock: &dyn Clock,
    ) -> Option<Projection> {
        let today = clock.today();
        if !period.contains(today) {
            return None;
        }
        let aggregate = SummaryService::aggregate_period(&book.transactions, period);
        let projection = Self::project(ProjectionInput {
            expense_so_far: aggregate.expense,
            income: aggregate.income,
            day_of_month: today.day(),
            days_in_month: period.days_in_month(),
            allocation: Allocation::from_income(aggregate.income, &book.strategy),
        });
        if let Some(projection) = &projection {
            tracing::debug!(
                daily_rate = projection.daily_rate,
                projected_expense = projection.projected_expense,
                "projected month-end spend"
            );
        }
        projection
    }
}
