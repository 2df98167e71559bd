use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    bill::Bill,
    budget::Budget,
    category::CategorySet,
    common::OwnerId,
    debt::Debt,
    goal::Goal,
    installment::InstallmentPlan,
    recurring::RecurringRule,
    strategy::Strategy,
    transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything one owner has recorded.
///
/// The application owns a mutable book and hands `&FinanceBook` to the
/// aggregation services, which never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceBook {
    pub owner_id: OwnerId,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub categories: CategorySet,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub installments: Vec<InstallmentPlan>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "FinanceBook::schema_version_default")]
    pub schema_version: u8,
}

impl FinanceBook {
    pub fn new(owner_id: OwnerId) -> Self {
        let now = Utc::now();
        Self {
            owner_id,
            transactions: Vec::new(),
            budgets: Vec::new(),
            strategy: Strategy::default(),
            categories: CategorySet::default(),
            bills: Vec::new(),
            recurring: Vec::new(),
            goals: Vec::new(),
            installments: Vec::new(),
            debts: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// Removes a transaction, returning it if it existed.
    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    /// Sets the limit for a category, replacing any previous value.
    pub fn upsert_budget(&mut self, budget: Budget) {
        match self
            .budgets
            .iter_mut()
            .find(|existing| existing.category == budget.category)
        {
            Some(existing) => existing.amount = budget.amount,
            None => self.budgets.push(budget),
        }
        self.touch();
    }

    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.category == category)
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = Strategy::new(strategy.savings_percent, strategy.investment_percent);
        self.touch();
    }

    pub fn add_bill(&mut self, bill: Bill) -> Uuid {
        let id = bill.id;
        self.bills.push(bill);
        self.touch();
        id
    }

    pub fn bill_mut(&mut self, id: Uuid) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|bill| bill.id == id)
    }

    pub fn add_recurring(&mut self, rule: RecurringRule) -> Uuid {
        let id = rule.id;
        self.recurring.push(rule);
        self.touch();
        id
    }

    pub fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        self.touch();
        id
    }

    pub fn add_installment(&mut self, plan: InstallmentPlan) -> Uuid {
        let id = plan.id;
        self.installments.push(plan);
        self.touch();
        id
    }

    pub fn add_debt(&mut self, debt: Debt) -> Uuid {
        let id = debt.id;
        self.debts.push(debt);
        self.touch();
        id
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_upsert_replaces_previous_value() {
        let mut book = FinanceBook::new(OwnerId::new("owner"));
        book.upsert_budget(Budget::new("Ocio", 1000.0));
        book.upsert_budget(Budget::new("Ocio", 2500.0));
        assert_eq!(book.budgets.len(), 1);
        assert_eq!(book.budget_for("Ocio").map(|b| b.amount), Some(2500.0));
    }

    #[test]
    fn strategy_is_clamped_when_stored() {
        let mut book = FinanceBook::new(OwnerId::new("owner"));
        book.set_strategy(Strategy {
            savings_percent: 140.0,
            investment_percent: 10.0,
        });
        assert_eq!(book.strategy.savings_percent, 100.0);
    }
}
