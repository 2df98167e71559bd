use chrono::Utc;
use uuid::Uuid;

use crate::domain::FinanceBook;

use super::{ServiceError, ServiceResult};

pub struct GoalService;

impl GoalService {
    /// Adds to a goal's saved amount and returns the new balance.
    pub fn contribute(book: &mut FinanceBook, id: Uuid, amount: f64) -> ServiceResult<f64> {
        Self::adjust(book, id, Self::checked(amount)?)
    }

    /// Takes money out of a goal. The saved amount never drops below zero.
    pub fn withdraw(book: &mut FinanceBook, id: Uuid, amount: f64) -> ServiceResult<f64> {
        Self::adjust(book, id, -Self::checked(amount)?)
    }

    pub fn progress(book: &FinanceBook, id: Uuid) -> ServiceResult<f64> {
        book.goals
            .iter()
            .find(|goal| goal.id == id)
            .map(|goal| goal.progress())
            .ok_or_else(|| ServiceError::NotFound(format!("goal {id}")))
    }

    pub fn remove(book: &mut FinanceBook, id: Uuid) -> ServiceResult<()> {
        let before = book.goals.len();
        book.goals.retain(|goal| goal.id != id);
        if book.goals.len() == before {
            return Err(ServiceError::NotFound(format!("goal {id}")));
        }
        book.touch();
        Ok(())
    }

    fn adjust(book: &mut FinanceBook, id: Uuid, delta: f64) -> ServiceResult<f64> {
        let goal = book
            .goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("goal {id}")))?;
        goal.current_amount = (goal.current_amount + delta).max(0.0);
        goal.updated_at = Utc::now();
        let balance = goal.current_amount;
        book.touch();
        Ok(balance)
    }

    fn checked(amount: f64) -> ServiceResult<f64> {
        if amount.is_finite() && amount > 0.0 {
            Ok(amount)
        } else {
            Err(ServiceError::Invalid(format!("Invalid amount `{amount}`")))
        }
    }
}
