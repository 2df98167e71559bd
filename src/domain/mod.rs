pub mod bill;
pub mod book;
pub mod budget;
pub mod category;
pub mod common;
pub mod debt;
pub mod goal;
pub mod installment;
pub mod period;
pub mod recurring;
pub mod strategy;
pub mod time_interval;
pub mod transaction;

pub use bill::{Bill, BillRecurrence, BillStatus};
pub use book::FinanceBook;
pub use budget::Budget;
pub use category::{CategoryEntry, CategorySet};
pub use common::{Identifiable, OwnerId, Timestamped};
pub use debt::{Debt, DebtDirection};
pub use goal::Goal;
pub use installment::InstallmentPlan;
pub use period::Period;
pub use recurring::{Frequency, RecurringRule, RuleState};
pub use strategy::{Strategy, StrategyField};
pub use time_interval::{TimeInterval, TimeUnit};
pub use transaction::{Transaction, TransactionKind, TransactionPatch};
