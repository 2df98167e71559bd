use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::time_interval::{TimeInterval, TimeUnit};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillRecurrence {
    #[default]
    None,
    Monthly,
    Yearly,
}

impl BillRecurrence {
    pub fn interval(&self) -> Option<TimeInterval> {
        match self {
            BillRecurrence::None => None,
            BillRecurrence::Monthly => Some(TimeInterval::new(1, TimeUnit::Month)),
            BillRecurrence::Yearly => Some(TimeInterval::new(1, TimeUnit::Year)),
        }
    }
}

/// A due item with an optional reminder lead time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub due_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub recurrence: BillRecurrence,
    #[serde(default)]
    pub reminder_days: u32,
}

impl Bill {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount: sanitize_amount(amount),
            due_date,
            category: category.into(),
            status: BillStatus::Pending,
            recurrence: BillRecurrence::None,
            reminder_days: 3,
        }
    }

    pub fn with_recurrence(mut self, recurrence: BillRecurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_reminder_days(mut self, days: u32) -> Self {
        self.reminder_days = days;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == BillStatus::Pending
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

