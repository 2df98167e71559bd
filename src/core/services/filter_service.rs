//! Selection of transactions for the history view.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::domain::{Period, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionScope {
    Month(Period),
    AllPeriods,
}

impl TransactionScope {
    pub fn admits(&self, txn: &Transaction) -> bool {
        match self {
            TransactionScope::Month(period) => period.contains(txn.date),
            TransactionScope::AllPeriods => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first; same-day records fall back to newest `created_at` first.
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

/// Criteria applied to a transaction list. Unset criteria match everything.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub scope: TransactionScope,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub query: Option<String>,
    pub sort: Option<SortKey>,
}

impl TransactionFilter {
    pub fn for_period(period: Period) -> Self {
        Self {
            scope: TransactionScope::Month(period),
            kind: None,
            category: None,
            date: None,
            query: None,
            sort: None,
        }
    }

    /// Current month per `clock`, no filters, no sort.
    pub fn for_today(clock: &dyn Clock) -> Self {
        Self::for_period(Period::from_date(clock.today()))
    }

    pub fn all_periods() -> Self {
        Self {
            scope: TransactionScope::AllPeriods,
            ..Self::for_period(Period::from_date(NaiveDate::MIN))
        }
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// True when anything beyond the plain month view is applied.
    pub fn has_active_filters(&self) -> bool {
        self.kind.is_some()
            || self.category.as_deref().is_some_and(|c| !c.is_empty())
            || self.date.is_some()
            || self.normalized_query().is_some()
            || self.sort.is_some_and(|key| key != SortKey::DateDesc)
            || self.scope == TransactionScope::AllPeriods
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.scope.admits(txn) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if txn.category != category {
                return false;
            }
        }
        if self.date.is_some_and(|date| date != txn.date) {
            return false;
        }
        match self.normalized_query() {
            Some(query) => matches_query(txn, &query),
            None => true,
        }
    }

    /// Returns the matching records. Input order is kept unless a sort key is set.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> =
            transactions.iter().filter(|txn| self.matches(txn)).collect();
        if let Some(key) = self.sort {
            selected.sort_by(|a, b| compare(key, a, b));
        }
        selected
    }

    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}


/// Distinct category names present in the scoped set, sorted.
pub fn filterable_categories(
    transactions: &[Transaction],
    scope: TransactionScope,
    kind: Option<TransactionKind>,
) -> Vec<String> {
    transactions
        .iter()
        .filter(|txn| scope.admits(txn))
        .filter(|txn| kind.map_or(true, |kind| txn.kind == kind))
        .map(|txn| txn.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches_query(txn: &Transaction, query: &str) -> bool {
    txn.category.to_lowercase().contains(query)
        || txn
            .note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(query))
        || txn.amount.to_string().contains(query)
}

fn compare(key: SortKey, a: &Transaction, b: &Transaction) -> Ordering {
    match key {
        SortKey::DateDesc => b
            .date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at)),
        SortKey::DateAsc => a.date.cmp(&b.date),
        SortKey::AmountDesc => b.amount.total_cmp(&a.amount),
        SortKey::AmountAsc => a.amount.total_cmp(&b.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OwnerId;

    fn txn(kind: TransactionKind, amount: f64, category: &str, day: u32, note: &str) -> Transaction {
        Transaction::new(
            OwnerId::new("owner"),
            kind,
            amount,
            category,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
        .with_note(note)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionKind::Expense, 500.0, "Alimentación", 5, "super"),
            txn(TransactionKind::Income, 10000.0, "Sueldo", 1, ""),
            txn(TransactionKind::Expense, 1500.0, "Ocio", 10, "Cine con amigos"),
            Transaction::new(
                OwnerId::new("owner"),
                TransactionKind::Expense,
                42.0,
                "Ocio",
                NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            ),
        ]
    }

    #[test]
    fn month_scope_keeps_input_order() {
        let data = sample();
        let march = Period::new(2025, 3).unwrap();
        let result = TransactionFilter::for_period(march).apply(&data);
        let amounts: Vec<f64> = result.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![500.0, 10000.0, 1500.0]);
    }

    #[test]
    fn today_filter_follows_the_injected_clock() {
        let data = sample();
        let clock = crate::core::clock::FixedClock::new(NaiveDate::from_ymd_opt(2025, 2, 27).unwrap());
        let filter = TransactionFilter::for_today(&clock);
        assert!(!filter.has_active_filters());
        let result = filter.apply(&data);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, 42.0);
    }

    #[test]
    fn query_matches_category_note_and_amount() {
        let data = sample();
        let all = TransactionFilter::all_periods();
        assert_eq!(all.clone().query("CINE").apply(&data).len(), 1);
        assert_eq!(all.clone().query("ocio").apply(&data).len(), 2);
        assert_eq!(all.clone().query("1500").apply(&data).len(), 1);
        assert_eq!(all.query("   ").apply(&data).len(), 4);
    }

    #[test]
    fn kind_category_and_date_filters_combine() {
        let data = sample();
        let all = TransactionFilter::all_periods();
        assert_eq!(all.clone().kind(TransactionKind::Income).apply(&data).len(), 1);
        assert_eq!(
            all.clone()
                .kind(TransactionKind::Expense)
                .category("Ocio")
                .apply(&data)
                .len(),
            2
        );
        let on_fifth = all.on_date(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(on_fifth.apply(&data).len(), 1);
    }

    #[test]
    fn sorting_by_amount_and_date() {
        let data = sample();
        let by_amount = TransactionFilter::all_periods()
            .sorted_by(SortKey::AmountDesc)
            .apply(&data);
        assert_eq!(by_amount.first().map(|t| t.amount), Some(10000.0));
        let oldest = TransactionFilter::all_periods()
            .sorted_by(SortKey::DateAsc)
            .apply(&data);
        assert_eq!(oldest.first().map(|t| t.amount), Some(42.0));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(TransactionFilter::all_periods().query("x").apply(&[]).is_empty());
    }

    #[test]
    fn filterable_categories_are_sorted_and_unique() {
        let data = sample();
        let cats = filterable_categories(
            &data,
            TransactionScope::AllPeriods,
            Some(TransactionKind::Expense),
        );
        assert_eq!(cats, vec!["Alimentación".to_string(), "Ocio".to_string()]);
    }

    #[test]
    fn active_filters_are_detected() {
        let march = Period::new(2025, 3).unwrap();
        assert!(!TransactionFilter::for_period(march).has_active_filters());
        assert!(!TransactionFilter::for_period(march)
            .sorted_by(SortKey::DateDesc)
            .has_active_filters());
        assert!(TransactionFilter::for_period(march).query("x").has_active_filters());
        assert!(TransactionFilter::all_periods().has_active_filters());
    }
}
