use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Debt, FinanceBook};

use super::{ServiceError, ServiceResult};

pub struct DebtService;

impl DebtService {
    pub fn settle(book: &mut FinanceBook, id: Uuid) -> ServiceResult<()> {
        Self::set_settled(book, id, true)
    }

    pub fn reopen(book: &mut FinanceBook, id: Uuid) -> ServiceResult<()> {
        Self::set_settled(book, id, false)
    }

    pub fn open_debts(book: &FinanceBook) -> Vec<&Debt> {
        book.debts.iter().filter(|debt| debt.is_open()).collect()
    }

    fn set_settled(book: &mut FinanceBook, id: Uuid, settled: bool) -> ServiceResult<()> {
        let debt = book
            .debts
            .iter_mut()
            .find(|debt| debt.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("debt {id}")))?;
        if debt.settled != settled {
            debt.settled = settled;
            debt.updated_at = Utc::now();
            book.touch();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DebtDirection, OwnerId};

    #[test]
    fn settle_and_reopen_toggle_open_state() {
        let mut book = FinanceBook::new(OwnerId::new("owner"));
        let id = book.add_debt(Debt::new("Juan", 300.0, DebtDirection::OwedToMe));
        book.add_debt(Debt::new("Ana", 50.0, DebtDirection::IOwe));

        DebtService::settle(&mut book, id).unwrap();
        assert_eq!(DebtService::open_debts(&book).len(), 1);
        DebtService::reopen(&mut book, id).unwrap();
        assert_eq!(DebtService::open_debts(&book).len(), 2);
        assert!(DebtService::settle(&mut book, Uuid::new_v4()).is_err());
    }
}
