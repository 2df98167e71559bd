use serde::{Deserialize, Deserializer, Serialize};

/// Fixed shares of income earmarked for savings and investment.
///
/// Each percentage is clamped to `[0, 100]`; they are independent and may sum
/// past 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Strategy {
    #[serde(deserialize_with = "clamped_percent", default)]
    pub savings_percent: f64,
    #[serde(deserialize_with = "clamped_percent", default)]
    pub investment_percent: f64,
}

impl Strategy {
    pub fn new(savings_percent: f64, investment_percent: f64) -> Self {
        Self {
            savings_percent: clamp_percent(savings_percent),
            investment_percent: clamp_percent(investment_percent),
        }
    }

    pub fn set(&mut self, field: StrategyField, value: f64) {
        match field {
            StrategyField::Savings => self.savings_percent = clamp_percent(value),
            StrategyField::Investment => self.investment_percent = clamp_percent(value),
        }
    }

    pub fn total_percent(&self) -> f64 {
        self.savings_percent + self.investment_percent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyField {
    Savings,
    Investment,
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn clamped_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = crate::domain::common::lenient_number(deserializer)?;
    Ok(clamp_percent(value))
}
