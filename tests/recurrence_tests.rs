mod common;

use common::day;
use metacasa_core::{
    core::{
        clock::FixedClock,
        services::{BillService, RecurrenceService},
    },
    domain::{
        Bill, BillRecurrence, FinanceBook, Frequency, OwnerId, RecurringRule, RuleState,
        TimeInterval, TimeUnit, TransactionKind,
    },
};

#[test]
fn monthly_rule_from_january_31_clamps_each_month() {
    let clock = FixedClock::new(day(2024, 4, 30));
    let mut book = FinanceBook::new(OwnerId::new("casa"));
    book.add_recurring(RecurringRule::new(
        TransactionKind::Expense,
        800.0,
        "Vivienda",
        Frequency::Monthly,
        day(2024, 1, 31),
    ));

    let emitted = RecurrenceService::run_due(&mut book, day(2024, 4, 30), &clock);
    assert_eq!(emitted, 4);
    let dates: Vec<_> = book.transactions.iter().map(|txn| txn.date).collect();
    assert_eq!(
        dates,
        vec![day(2024, 1, 31), day(2024, 2, 29), day(2024, 3, 31), day(2024, 4, 30)]
    );
    assert_eq!(book.recurring[0].next_date, day(2024, 5, 31));
    assert_eq!(book.recurring[0].state(day(2024, 5, 1)), RuleState::Scheduled);
}

#[test]
fn yearly_leap_day_returns_in_leap_years() {
    let mut rule = RecurringRule::new(
        TransactionKind::Income,
        1.0,
        "Ventas",
        Frequency::Yearly,
        day(2024, 2, 29),
    );
    let clock = FixedClock::new(day(2029, 1, 1));
    let owner = OwnerId::new("casa");
    let mut seen = Vec::new();
    while let Some(txn) = RecurrenceService::process(&mut rule, &owner, day(2029, 1, 1), &clock) {
        seen.push(txn.date);
    }
    assert_eq!(
        seen,
        vec![day(2024, 2, 29), day(2025, 2, 28), day(2026, 2, 28), day(2027, 2, 28), day(2028, 2, 29)]
    );
}

#[test]
fn emitted_transactions_carry_rule_fields() {
    let clock = FixedClock::new(day(2025, 3, 1));
    let mut book = FinanceBook::new(OwnerId::new("casa"));
    book.add_recurring(
        RecurringRule::new(TransactionKind::Expense, 120.0, "Servicios", Frequency::Daily, day(2025, 3, 1))
            .with_note("streaming"),
    );
    RecurrenceService::run_due(&mut book, day(2025, 3, 1), &clock);

    let txn = &book.transactions[0];
    assert_eq!(txn.kind, TransactionKind::Expense);
    assert_eq!(txn.amount, 120.0);
    assert_eq!(txn.category, "Servicios");
    assert_eq!(txn.note.as_deref(), Some("streaming"));
    assert_eq!(txn.owner_id, book.owner_id);
}

#[test]
fn yearly_bill_spawns_one_year_later() {
    let mut book = FinanceBook::new(OwnerId::new("casa"));
    let id = book.add_bill(
        Bill::new("Seguro", 50000.0, day(2025, 6, 15), "Transporte").with_recurrence(BillRecurrence::Yearly),
    );
    let next = BillService::mark_paid(&mut book, id).unwrap().unwrap();
    let spawned = book.bills.iter().find(|bill| bill.id == next).unwrap();
    assert_eq!(spawned.due_date, day(2026, 6, 15));
    assert_eq!(spawned.reminder_days, 3);
}

#[test]
fn intervals_step_by_calendar_units() {
    let weekly = TimeInterval::new(2, TimeUnit::Week);
    assert_eq!(weekly.next_date(day(2025, 12, 25)), day(2026, 1, 8));
    let quarterly = TimeInterval::new(3, TimeUnit::Month);
    assert_eq!(quarterly.next_date(day(2025, 11, 30)), day(2026, 2, 28));
}
