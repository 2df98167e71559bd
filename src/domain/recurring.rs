use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::time_interval::{TimeInterval, TimeUnit};
use crate::domain::transaction::TransactionKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn interval(&self) -> TimeInterval {
        match self {
            Frequency::Daily => TimeInterval::new(1, TimeUnit::Day),
            Frequency::Weekly => TimeInterval::new(1, TimeUnit::Week),
            Frequency::Monthly => TimeInterval::new(1, TimeUnit::Month),
            Frequency::Yearly => TimeInterval::new(1, TimeUnit::Year),
        }
    }
}

/// Where a rule sits relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    /// `next_date <= today`: an occurrence is waiting to be emitted.
    PendingDue,
    /// `next_date > today`.
    Scheduled,
    /// The rule is inactive and will not emit again.
    Expired,
}

/// A template that emits one transaction per frequency unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringRule {
    pub id: Uuid,
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub category: String,
    pub frequency: Frequency,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub next_date: NaiveDate,
    #[serde(default, deserialize_with = "optional_day")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_active() -> bool {
    true
}

impl RecurringRule {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount: sanitize_amount(amount),
            category: category.into(),
            frequency,
            start_date,
            next_date: start_date,
            end_date: None,
            active: true,
            note: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn state(&self, today: NaiveDate) -> RuleState {
        if !self.active {
            RuleState::Expired
        } else if self.next_date <= today {
            RuleState::PendingDue
        } else {
            RuleState::Scheduled
        }
    }

    /// Date following `next_date`, anchored on the start date's day-of-month.
    pub fn following_date(&self) -> NaiveDate {
        self.frequency
            .interval()
            .next_date_anchored(self.next_date, self.start_date.day())
    }

    pub fn is_past_end(&self, date: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| date > end)
    }
}

impl Identifiable for RecurringRule {
    fn id(&self) -> Uuid {
        self.id
    }
}
