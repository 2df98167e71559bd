pub mod json_backend;
pub mod legacy;

use crate::{
    core::errors::BudgetError,
    domain::{FinanceBook, OwnerId},
};

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Abstraction over persistence backends holding one book per owner.
pub trait StorageBackend: Send + Sync {
    /// Loads the owner's book; a missing book loads as a fresh one.
    fn load(&self, owner: &OwnerId) -> Result<FinanceBook>;
    fn save(&self, book: &FinanceBook) -> Result<()>;
    fn exists(&self, owner: &OwnerId) -> bool;
}

pub use json_backend::JsonStorage;
pub use legacy::{merge_by_timestamp, LegacyPayload};
