//! Normalization of the old single-blob settings payload.
//!
//! The blob mixed category lists, emoji metadata, goals, installment plans
//! and debts under one JSON object. Each key is read into its typed entity;
//! unknown keys are ignored and malformed entries are skipped.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::common::{lenient_amount, optional_day, Identifiable, Timestamped};
use crate::domain::{
    CategoryEntry, CategorySet, Debt, DebtDirection, FinanceBook, Goal, InstallmentPlan,
};

const EXPENSE_KEY: &str = "GASTO";
const INCOME_KEY: &str = "INGRESO";
const EMOJI_KEY: &str = "emojis";
const GOALS_KEY: &str = "goals";
const INSTALLMENTS_KEY: &str = "cuotas";
const DEBTS_KEY: &str = "debts";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyPayload {
    /// `None` when the blob carried no category lists.
    pub categories: Option<CategorySet>,
    pub goals: Vec<Goal>,
    pub installments: Vec<InstallmentPlan>,
    pub debts: Vec<Debt>,
}

impl LegacyPayload {
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            tracing::warn!("legacy payload is not an object, ignoring it");
            return Self::default();
        };

        let emojis: HashMap<String, String> = object
            .get(EMOJI_KEY)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, emoji)| Some((name.clone(), emoji.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let expense = object.get(EXPENSE_KEY).map(|list| category_list(list, &emojis));
        let income = object.get(INCOME_KEY).map(|list| category_list(list, &emojis));
        let categories = match (expense, income) {
            (None, None) => None,
            (expense, income) => {
                let seed = CategorySet::default();
                Some(CategorySet {
                    expense: expense.unwrap_or(seed.expense),
                    income: income.unwrap_or(seed.income),
                })
            }
        };

        Self {
            categories,
            goals: entries::<LegacyGoal>(object.get(GOALS_KEY), GOALS_KEY)
                .into_iter()
                .map(Goal::from)
                .collect(),
            installments: entries::<LegacyInstallment>(object.get(INSTALLMENTS_KEY), INSTALLMENTS_KEY)
                .into_iter()
                .filter_map(LegacyInstallment::into_plan)
                .collect(),
            debts: entries::<LegacyDebt>(object.get(DEBTS_KEY), DEBTS_KEY)
                .into_iter()
                .map(Debt::from)
                .collect(),
        }
    }

    pub fn from_json(raw: &str) -> crate::core::errors::Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }

    /// Folds the payload into `book`, treating it as the remote side of a merge.
    pub fn apply_to(self, book: &mut FinanceBook) {
        if let Some(categories) = self.categories {
            book.categories = categories;
        }
        book.goals = merge_by_timestamp(&book.goals, &self.goals);
        book.installments = merge_by_timestamp(&book.installments, &self.installments);
        book.debts = merge_by_timestamp(&book.debts, &self.debts);
        book.touch();
    }
}

/// Merges two copies of a collection by id.
///
/// When both sides hold an item the newer `updated_at` wins, and ties go to
/// `remote`. Items present on one side only are kept. Remote order comes
/// first, followed by local-only items in their local order.
pub fn merge_by_timestamp<T>(local: &[T], remote: &[T]) -> Vec<T>
where
    T: Identifiable + Timestamped + Clone,
{
    let local_by_id: HashMap<Uuid, &T> = local.iter().map(|item| (item.id(), item)).collect();
    let mut merged: Vec<T> = remote
        .iter()
        .map(|theirs| match local_by_id.get(&theirs.id()) {
            Some(ours) if ours.updated_at() > theirs.updated_at() => (*ours).clone(),
            _ => theirs.clone(),
        })
        .collect();
    let remote_ids: std::collections::HashSet<Uuid> = remote.iter().map(|item| item.id()).collect();
    merged.extend(
        local
            .iter()
            .filter(|item| !remote_ids.contains(&item.id()))
            .cloned(),
    );
    merged
}

fn category_list(list: &Value, emojis: &HashMap<String, String>) -> Vec<CategoryEntry> {
    let Some(items) = list.as_array() else {
        tracing::warn!("legacy category list is not an array, skipping it");
        return Vec::new();
    };
    let mut seen: Vec<String> = Vec::new();
    items
        .iter()
        .filter_map(|item| {
            let name = item.as_str()?.trim();
            if name.is_empty() || seen.iter().any(|known| known.eq_ignore_ascii_case(name)) {
                return None;
            }
            seen.push(name.to_string());
            let entry = CategoryEntry::new(name);
            Some(match emojis.get(name) {
                Some(emoji) => entry.with_emoji(emoji.clone()),
                None => entry,
            })
        })
        .collect()
}

fn entries<T: DeserializeOwned>(value: Option<&Value>, key: &str) -> Vec<T> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(key, error = %err, "skipping malformed legacy entry");
                None
            }
        })
        .collect()
}

/// Namespace for ids derived from legacy entries.
const LEGACY_NAMESPACE: Uuid = Uuid::from_u128(0x4d65_7461_4361_5361_8c1e_6c65_6761_6379);

/// Stable id for a legacy entry. UUID strings are kept as-is. Any other id
/// (numeric timestamps, free text) is hashed into a v5 UUID, so re-reading
/// the same blob yields the same ids. Entries without an id fall back to
/// their natural key.
fn legacy_id(collection: &str, raw: &Option<Value>, natural_key: &str) -> Uuid {
    let token = match raw {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            if let Ok(id) = Uuid::parse_str(text.trim()) {
                return id;
            }
            format!("id:{}", text.trim())
        }
        Some(Value::Number(number)) => format!("id:{number}"),
        _ => format!("key:{natural_key}"),
    };
    Uuid::new_v5(&LEGACY_NAMESPACE, format!("{collection}/{token}").as_bytes())
}

#[derive(Debug, Deserialize)]
struct LegacyGoal {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default, alias = "target", deserialize_with = "lenient_amount")]
    target_amount: f64,
    #[serde(default, alias = "current", deserialize_with = "lenient_amount")]
    current_amount: f64,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<LegacyGoal> for Goal {
    fn from(legacy: LegacyGoal) -> Self {
        Goal {
            id: legacy_id(GOALS_KEY, &legacy.id, &legacy.name),
            name: legacy.name,
            emoji: legacy.emoji,
            target_amount: legacy.target_amount,
            current_amount: legacy.current_amount,
            updated_at: legacy.updated_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegacyInstallment {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    #[serde(default, alias = "amount", deserialize_with = "lenient_amount")]
    installment_amount: f64,
    #[serde(alias = "total")]
    total_installments: u32,
    #[serde(default, alias = "paid")]
    paid_installments: u32,
    #[serde(default, alias = "start", deserialize_with = "optional_day")]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl LegacyInstallment {
    fn into_plan(self) -> Option<InstallmentPlan> {
        let Some(start_date) = self.start_date else {
            tracing::warn!(name = %self.name, "skipping legacy installment without start date");
            return None;
        };
        Some(InstallmentPlan {
            id: legacy_id(
                INSTALLMENTS_KEY,
                &self.id,
                &format!("{}|{}", self.name, start_date),
            ),
            name: self.name,
            installment_amount: self.installment_amount,
            total_installments: self.total_installments,
            paid_installments: self.paid_installments.min(self.total_installments),
            start_date,
            updated_at: self.updated_at.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LegacyDebt {
    #[serde(default)]
    id: Option<Value>,
    #[serde(alias = "name")]
    person: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    amount: f64,
    #[serde(alias = "type")]
    direction: LegacyDirection,
    #[serde(default, alias = "paid")]
    settled: bool,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
enum LegacyDirection {
    #[serde(alias = "owed_to_me", alias = "me_deben")]
    OwedToMe,
    #[serde(alias = "i_owe", alias = "debo")]
    IOwe,
}

impl From<LegacyDebt> for Debt {
    fn from(legacy: LegacyDebt) -> Self {
        Debt {
            id: legacy_id(
                DEBTS_KEY,
                &legacy.id,
                &format!("{}|{:?}", legacy.person, legacy.direction),
            ),
            person: legacy.person,
            amount: legacy.amount,
            direction: match legacy.direction {
                LegacyDirection::OwedToMe => DebtDirection::OwedToMe,
                LegacyDirection::IOwe => DebtDirection::IOwe,
            },
            settled: legacy.settled,
            note: legacy.note,
            updated_at: legacy.updated_at.unwrap_or_default(),
        }
    }
}
