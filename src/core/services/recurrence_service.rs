//! Emits transactions from recurring rules that have come due.

use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::domain::{FinanceBook, OwnerId, RecurringRule, RuleState, Transaction};

/// Upper bound on emissions for a single rule in one catch-up pass.
const MAX_CATCH_UP: usize = 1024;

pub struct RecurrenceService;

impl RecurrenceService {
    /// Processes one occurrence of `rule` if it is due on `today`.
    ///
    /// Emits a transaction dated at the rule's `next_date` and moves
    /// `next_date` forward by exactly one frequency unit. A rule whose next
    /// date already lies past its end date is deactivated without emitting.
    pub fn process(
        rule: &mut RecurringRule,
        owner: &OwnerId,
        today: NaiveDate,
        clock: &dyn Clock,
    ) -> Option<Transaction> {
        if rule.state(today) != RuleState::PendingDue {
            return None;
        }
        if rule.is_past_end(rule.next_date) {
            rule.active = false;
            tracing::info!(rule = %rule.id, "recurring rule expired");
            return None;
        }

        let mut transaction = Transaction::new(
            owner.clone(),
            rule.kind,
            rule.amount,
            rule.category.clone(),
            rule.next_date,
        )
        .with_created_at(clock.now());
        if let Some(note) = &rule.note {
            transaction = transaction.with_note(note.clone());
        }

        let following = rule.following_date();
        debug_assert!(following > rule.next_date);
        rule.next_date = following;
        if rule.is_past_end(following) {
            rule.active = false;
            tracing::info!(rule = %rule.id, "recurring rule reached its end date");
        }

        tracing::info!(
            rule = %rule.id,
            date = %transaction.date,
            amount = transaction.amount,
            "emitted recurring transaction"
        );
        Some(transaction)
    }

    /// Catches up every due occurrence of every rule, appending the emitted
    /// transactions to the book. Returns how many were emitted.
    pub fn run_due(book: &mut FinanceBook, today: NaiveDate, clock: &dyn Clock) -> usize {
        let owner = book.owner_id.clone();
        let mut emitted = Vec::new();
        for rule in book.recurring.iter_mut() {
            let mut steps = 0;
            while steps < MAX_CATCH_UP {
                match Self::process(rule, &owner, today, clock) {
                    Some(transaction) => emitted.push(transaction),
                    None => break,
                }
                steps += 1;
            }
            if steps == MAX_CATCH_UP {
                tracing::warn!(rule = %rule.id, "recurring catch-up stopped at guard limit");
            }
        }

        let count = emitted.len();
        if count > 0 {
            book.transactions.extend(emitted);
            book.touch();
        }
        count
    }
}
