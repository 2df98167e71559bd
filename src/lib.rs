#![doc(test(attr(deny(warnings))))]

//! MetaCasa core: household income and expense records, budgets, a
//! savings/investment strategy, recurring rules and bills, plus the derived
//! monthly figures (balance, burn-rate projection, trends, net worth).

pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("MetaCasa core tracing initialized.");
    });
}
