use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A purchase paid in a fixed number of equal installments ("cuotas").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallmentPlan {
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub installment_amount: f64,
    pub total_installments: u32,
    #[serde(default)]
    pub paid_installments: u32,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub start_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl InstallmentPlan {
    pub fn new(
        name: impl Into<String>,
        installment_amount: f64,
        total_installments: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            installment_amount: sanitize_amount(installment_amount),
            total_installments,
            paid_installments: 0,
            start_date,
            updated_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.paid_installments < self.total_installments
    }

    pub fn remaining_installments(&self) -> u32 {
        self.total_installments.saturating_sub(self.paid_installments)
    }

    pub fn remaining_amount(&self) -> f64 {
        self.remaining_installments() as f64 * sanitize_amount(self.installment_amount)
    }

    pub fn total_amount(&self) -> f64 {
        self.total_installments as f64 * sanitize_amount(self.installment_amount)
    }
}

impl Identifiable for InstallmentPlan {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for InstallmentPlan {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
