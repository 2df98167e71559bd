pub mod bill_service;
pub mod budget_service;
pub mod category_service;
pub mod debt_service;
pub mod filter_service;
pub mod forecast_service;
pub mod goal_service;
pub mod installment_service;
pub mod net_worth_service;
pub mod recurrence_service;
pub mod summary_service;
pub mod transaction_service;
pub mod trend_service;

pub use bill_service::{BillReminder, BillService, ReminderStatus};
pub use budget_service::{BudgetAlert, BudgetLine, BudgetService, BudgetStatus};
pub use category_service::{CategoryService, RenameReport};
pub use debt_service::DebtService;
pub use filter_service::{SortKey, TransactionFilter, TransactionScope};
pub use forecast_service::{ForecastService, Projection, ProjectionInput};
pub use goal_service::GoalService;
pub use installment_service::InstallmentService;
pub use net_worth_service::{NetWorth, NetWorthService};
pub use recurrence_service::RecurrenceService;
pub use summary_service::{Aggregate, Allocation, CategoryShare, MonthlyStats, SummaryService};
pub use transaction_service::{Recorded, TransactionDraft, TransactionService};
pub use trend_service::{CategoryDelta, MonthlyPoint, TrendService};

use crate::core::errors::BudgetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_pass_through_unchanged() {
        let err: ServiceError = BudgetError::StorageError("disk full".into()).into();
        assert_eq!(err.to_string(), "Persistence error: disk full");
        assert_eq!(ServiceError::NotFound("bill 7".into()).to_string(), "bill 7 not found");
    }
}
