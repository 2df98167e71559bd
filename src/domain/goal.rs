use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A savings target with the amount put aside so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub current_amount: f64,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            emoji: None,
            target_amount: sanitize_amount(target_amount),
            current_amount: 0.0,
            updated_at: Utc::now(),
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Fraction of the target reached, in `[0, 1]`; zero when no target is set.
    pub fn progress(&self) -> f64 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Goal {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
