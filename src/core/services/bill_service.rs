use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bill, BillStatus, FinanceBook};

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    Overdue,
    DueToday,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillReminder {
    pub bill_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: ReminderStatus,
    /// Negative when overdue.
    pub days_until_due: i64,
}

pub struct BillService;

impl BillService {
    /// Marks a bill paid. Recurring bills spawn their next pending occurrence,
    /// whose id is returned. Paying an already paid bill changes nothing.
    pub fn mark_paid(book: &mut FinanceBook, id: Uuid) -> ServiceResult<Option<Uuid>> {
        let bill = book
            .bill_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("bill {id}")))?;
        if bill.status == BillStatus::Paid {
            return Ok(None);
        }
        bill.status = BillStatus::Paid;

        let next = bill.recurrence.interval().map(|interval| {
            let due_date = interval.next_date_anchored(bill.due_date, bill.due_date.day());
            Bill {
                id: Uuid::new_v4(),
                due_date,
                status: BillStatus::Pending,
                ..bill.clone()
            }
        });
        tracing::info!(bill = %id, "bill marked paid");

        match next {
            Some(next) => {
                tracing::info!(bill = %next.id, due = %next.due_date, "spawned next bill occurrence");
                Ok(Some(book.add_bill(next)))
            }
            None => {
                book.touch();
                Ok(None)
            }
        }
    }

    pub fn mark_pending(book: &mut FinanceBook, id: Uuid) -> ServiceResult<()> {
        let bill = book
            .bill_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("bill {id}")))?;
        bill.status = BillStatus::Pending;
        book.touch();
        Ok(())
    }

    /// Pending bills inside their reminder window, soonest due first.
    pub fn reminders(book: &FinanceBook, today: NaiveDate) -> Vec<BillReminder> {
        let mut reminders: Vec<BillReminder> = book
            .bills
            .iter()
            .filter(|bill| bill.is_pending())
            .filter(|bill| bill.due_date - Duration::days(bill.reminder_days as i64) <= today)
            .map(|bill| {
                let days_until_due = (bill.due_date - today).num_days();
                let status = match days_until_due {
                    d if d < 0 => ReminderStatus::Overdue,
                    0 => ReminderStatus::DueToday,
                    _ => ReminderStatus::Upcoming,
                };
                BillReminder {
                    bill_id: bill.id,
                    title: bill.title.clone(),
                    amount: bill.amount,
                    due_date: bill.due_date,
                    status,
                    days_until_due,
                }
            })
            .collect();
        reminders.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.title.cmp(&b.title)));
        reminders
    }
}
