use serde::{Deserialize, Serialize};

use crate::domain::{Debt, DebtDirection, FinanceBook, Goal, InstallmentPlan, Period};

use super::summary_service::{canonical_sum, SummaryService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorth {
    pub assets: f64,
    pub liabilities: f64,
    pub net: f64,
}

pub struct NetWorthService;

impl NetWorthService {
    /// A deficit month contributes nothing to assets rather than a negative amount.
    pub fn roll_up(
        available: f64,
        goals: &[Goal],
        debts: &[Debt],
        installments: &[InstallmentPlan],
    ) -> NetWorth {
        let available = if available.is_finite() { available.max(0.0) } else { 0.0 };
        let saved = canonical_sum(goals.iter().map(|goal| goal.current_amount).collect());
        let owed_to_me = Self::open_debt_total(debts, DebtDirection::OwedToMe);
        let i_owe = Self::open_debt_total(debts, DebtDirection::IOwe);
        let installments_due = canonical_sum(
            installments
                .iter()
                .filter(|plan| plan.is_active())
                .map(|plan| plan.remaining_amount())
                .collect(),
        );

        let assets = available + saved + owed_to_me;
        let liabilities = i_owe + installments_due;
        NetWorth {
            assets,
            liabilities,
            net: assets - liabilities,
        }
    }

    /// Net worth using the available balance of `period`.
    pub fn for_period(book: &FinanceBook, period: Period) -> NetWorth {
        let stats = SummaryService::monthly_stats(book, period);
        let worth = Self::roll_up(stats.available, &book.goals, &book.debts, &book.installments);
        tracing::debug!(
            period = %period,
            assets = worth.assets,
            liabilities = worth.liabilities,
            "rolled up net worth"
        );
        worth
    }

    fn open_debt_total(debts: &[Debt], direction: DebtDirection) -> f64 {
        canonical_sum(
            debts
                .iter()
                .filter(|debt| debt.is_open() && debt.direction == direction)
                .map(|debt| debt.amount)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plan(amount: f64, total: u32, paid: u32) -> InstallmentPlan {
        let mut plan =
            InstallmentPlan::new("Heladera", amount, total, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        plan.paid_installments = paid;
        plan
    }

    #[test]
    fn assets_and_liabilities_combine_every_source() {
        let mut goal = Goal::new("Vacaciones", 5000.0);
        goal.current_amount = 1200.0;
        let mut settled = Debt::new("Ana", 999.0, DebtDirection::IOwe);
        settled.settled = true;
        let debts = vec![
            Debt::new("Juan", 300.0, DebtDirection::OwedToMe),
            Debt::new("Ana", 100.0, DebtDirection::IOwe),
            settled,
        ];
        let plans = vec![plan(250.0, 12, 8), plan(1000.0, 3, 3)];

        let worth = NetWorthService::roll_up(2000.0, &[goal], &debts, &plans);
        assert_eq!(worth.assets, 2000.0 + 1200.0 + 300.0);
        assert_eq!(worth.liabilities, 100.0 + 4.0 * 250.0);
        assert_eq!(worth.net, worth.assets - worth.liabilities);
    }

    #[test]
    fn deficit_is_not_counted_as_an_asset() {
        let worth = NetWorthService::roll_up(-750.0, &[], &[], &[]);
        assert_eq!(worth, NetWorth::default());
    }
}
