use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A spending limit for one expense category. One row per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount: sanitize_amount(amount),
        }
    }
}
