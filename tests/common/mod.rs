#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use metacasa_core::{
    config::ConfigManager,
    domain::{FinanceBook, OwnerId, Strategy, Transaction, TransactionKind},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates isolated storage and config managers backed by a unique directory.
pub fn setup_test_env() -> (JsonStorage, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (storage, config_manager)
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn txn(
    owner: &OwnerId,
    kind: TransactionKind,
    amount: f64,
    category: &str,
    date: NaiveDate,
) -> Transaction {
    Transaction::new(owner.clone(), kind, amount, category, date)
}

/// The March 2025 household used across suites: one salary, one expense,
/// a 10/5 strategy.
pub fn march_book() -> FinanceBook {
    let owner = OwnerId::new("casa");
    let mut book = FinanceBook::new(owner.clone());
    book.set_strategy(Strategy::new(10.0, 5.0));
    book.add_transaction(txn(&owner, TransactionKind::Expense, 500.0, "Comida", day(2025, 3, 5)));
    book.add_transaction(txn(&owner, TransactionKind::Income, 10000.0, "Sueldo", day(2025, 3, 1)));
    book
}
