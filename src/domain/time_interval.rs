//! Calendar arithmetic shared by recurring rules and bills.
//!
//! Month and year steps never overflow into the following month: the day is
//! clamped to the last valid day of the target month. When an anchor day is
//! supplied (the day-of-month a series started on), the clamp is taken against
//! the anchor rather than the previous occurrence, so a series started on the
//! 31st lands on 29 Feb and then returns to 31 Mar.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn new(every: u32, unit: TimeUnit) -> Self {
        Self {
            every: every.max(1),
            unit,
        }
    }

    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        self.next_date_anchored(from, from.day())
    }

    /// Advances one interval, clamping month/year steps against `anchor_day`.
    pub fn next_date_anchored(&self, from: NaiveDate, anchor_day: u32) -> NaiveDate {
        match self.unit {
            TimeUnit::Day => from + Duration::days(self.every as i64),
            TimeUnit::Week => from + Duration::weeks(self.every as i64),
            TimeUnit::Month => shift_month(from, self.every as i32, anchor_day),
            TimeUnit::Year => shift_month(from, 12 * self.every as i32, anchor_day),
        }
    }
}

/// Moves `date` by `months`, using `anchor_day` clamped to the target month length.
pub fn shift_month(date: NaiveDate, months: i32, anchor_day: u32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = anchor_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_date_per_unit() {
        let start = date(2025, 1, 1);
        assert_eq!(TimeInterval::new(3, TimeUnit::Day).next_date(start), date(2025, 1, 4));
        assert_eq!(TimeInterval::new(2, TimeUnit::Week).next_date(start), date(2025, 1, 15));
        assert_eq!(TimeInterval::new(1, TimeUnit::Month).next_date(start), date(2025, 2, 1));
        assert_eq!(TimeInterval::new(1, TimeUnit::Year).next_date(start), date(2026, 1, 1));
    }

    #[test]
    fn month_end_clamps_and_recovers_with_anchor() {
        let monthly = TimeInterval::new(1, TimeUnit::Month);
        let feb = monthly.next_date_anchored(date(2024, 1, 31), 31);
        assert_eq!(feb, date(2024, 2, 29));
        let mar = monthly.next_date_anchored(feb, 31);
        assert_eq!(mar, date(2024, 3, 31));
        let apr = monthly.next_date_anchored(mar, 31);
        assert_eq!(apr, date(2024, 4, 30));
    }

    #[test]
    fn leap_day_yearly_clamps_to_feb_28() {
        let yearly = TimeInterval::new(1, TimeUnit::Year);
        let next = yearly.next_date_anchored(date(2024, 2, 29), 29);
        assert_eq!(next, date(2025, 2, 28));
        let leap_again = yearly.next_date_anchored(date(2027, 2, 28), 29);
        assert_eq!(leap_again, date(2028, 2, 29));
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(shift_month(date(2024, 12, 15), 1, 15), date(2025, 1, 15));
        assert_eq!(shift_month(date(2025, 1, 15), -1, 15), date(2024, 12, 15));
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
