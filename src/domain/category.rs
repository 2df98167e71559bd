//! Owner-defined category lists, one ordered list per transaction kind.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::domain::transaction::TransactionKind;

static DEFAULT_EXPENSE: &[&str] = &[
    "Vivienda",
    "Transporte",
    "Salud",
    "Ocio",
    "Alimentación",
    "Servicios",
];
static DEFAULT_INCOME: &[&str] = &["Sueldo", "Inversiones", "Ventas"];

static SEED: Lazy<CategorySet> = Lazy::new(|| CategorySet {
    expense: DEFAULT_EXPENSE.iter().map(|name| CategoryEntry::new(*name)).collect(),
    income: DEFAULT_INCOME.iter().map(|name| CategoryEntry::new(*name)).collect(),
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl CategoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySet {
    #[serde(default)]
    pub expense: Vec<CategoryEntry>,
    #[serde(default)]
    pub income: Vec<CategoryEntry>,
}

impl Default for CategorySet {
    fn default() -> Self {
        SEED.clone()
    }
}

impl CategorySet {
    pub fn empty() -> Self {
        Self {
            expense: Vec::new(),
            income: Vec::new(),
        }
    }

    pub fn entries(&self, kind: TransactionKind) -> &[CategoryEntry] {
        match kind {
            TransactionKind::Expense => &self.expense,
            TransactionKind::Income => &self.income,
        }
    }

    pub fn entries_mut(&mut self, kind: TransactionKind) -> &mut Vec<CategoryEntry> {
        match kind {
            TransactionKind::Expense => &mut self.expense,
            TransactionKind::Income => &mut self.income,
        }
    }

    pub fn names(&self, kind: TransactionKind) -> impl Iterator<Item = &str> {
        self.entries(kind).iter().map(|entry| entry.name.as_str())
    }

    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        self.find(kind, name).is_some()
    }

    pub fn find(&self, kind: TransactionKind, name: &str) -> Option<&CategoryEntry> {
        self.entries(kind).iter().find(|entry| entry.name == name)
    }

    pub fn emoji_for(&self, kind: TransactionKind, name: &str) -> Option<&str> {
        self.find(kind, name).and_then(|entry| entry.emoji.as_deref())
    }

    /// First category of the kind, used to pre-select forms.
    pub fn first(&self, kind: TransactionKind) -> Option<&str> {
        self.entries(kind).first().map(|entry| entry.name.as_str())
    }
}
