use chrono::Utc;
use uuid::Uuid;

use crate::domain::FinanceBook;

use super::{ServiceError, ServiceResult};

pub struct InstallmentService;

impl InstallmentService {
    /// Records one more paid installment and returns how many remain.
    pub fn pay_next(book: &mut FinanceBook, id: Uuid) -> ServiceResult<u32> {
        let plan = book
            .installments
            .iter_mut()
            .find(|plan| plan.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("installment plan {id}")))?;
        if !plan.is_active() {
            return Err(ServiceError::Invalid(format!(
                "`{}` is already fully paid",
                plan.name
            )));
        }
        plan.paid_installments += 1;
        plan.updated_at = Utc::now();
        let remaining = plan.remaining_installments();
        book.touch();
        Ok(remaining)
    }

    /// Sum of what is still owed across active plans.
    pub fn outstanding(book: &FinanceBook) -> f64 {
        book.installments
            .iter()
            .filter(|plan| plan.is_active())
            .map(|plan| plan.remaining_amount())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstallmentPlan, OwnerId};
    use chrono::NaiveDate;

    #[test]
    fn payments_are_bounded_by_total() {
        let mut book = FinanceBook::new(OwnerId::new("owner"));
        let start = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let id = book.add_installment(InstallmentPlan::new("Notebook", 100.0, 2, start));

        assert_eq!(InstallmentService::outstanding(&book), 200.0);
        assert_eq!(InstallmentService::pay_next(&mut book, id).unwrap(), 1);
        assert_eq!(InstallmentService::pay_next(&mut book, id).unwrap(), 0);
        assert!(InstallmentService::pay_next(&mut book, id).is_err());
        assert_eq!(book.installments[0].paid_installments, 2);
        assert_eq!(InstallmentService::outstanding(&book), 0.0);
    }
}
