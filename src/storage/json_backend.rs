use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    core::{
        errors::BudgetError,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    domain::{book::CURRENT_SCHEMA_VERSION, FinanceBook, OwnerId},
};

use super::{Result, StorageBackend};

/// One pretty-printed JSON file per owner under `<base>/books`.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    books_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let books_dir = PathResolver::books_dir_in(&app_root);
        ensure_dir(&books_dir)?;
        Ok(Self {
            root: app_root,
            books_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn book_path(&self, owner: &OwnerId) -> PathBuf {
        self.books_dir
            .join(format!("{}.json", canonical_name(owner.as_str())))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, owner: &OwnerId) -> Result<FinanceBook> {
        let path = self.book_path(owner);
        if !path.exists() {
            tracing::info!(owner = %owner, "no stored book, starting fresh");
            return Ok(FinanceBook::new(owner.clone()));
        }
        let book = load_book_from_path(&path)?;
        if book.owner_id != *owner {
            return Err(BudgetError::StorageError(format!(
                "`{}` belongs to another owner",
                path.display()
            )));
        }
        Ok(book)
    }

    fn save(&self, book: &FinanceBook) -> Result<()> {
        let path = self.book_path(&book.owner_id);
        if let Some(stored) = stored_owner(&path)? {
            if stored != book.owner_id {
                return Err(BudgetError::StorageError(format!(
                    "refusing to overwrite `{}`: it belongs to another owner",
                    path.display()
                )));
            }
        }
        save_book_to_path(book, &path)?;
        tracing::info!(
            owner = %book.owner_id,
            transactions = book.transaction_count(),
            path = %path.display(),
            "saved book"
        );
        Ok(())
    }

    fn exists(&self, owner: &OwnerId) -> bool {
        self.book_path(owner).exists()
    }
}

pub fn save_book_to_path(book: &FinanceBook, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    write_atomic(path, &json)
}

pub fn load_book_from_path(path: &Path) -> Result<FinanceBook> {
    let data = fs::read_to_string(path)?;
    let book: FinanceBook = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(BudgetError::StorageError(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            book.schema_version
        )));
    }
    Ok(book)
}

/// File stem for an owner token. Lowercase ASCII letters, digits and `-` are
/// kept; every other byte becomes `_xx` (lowercase hex). The mapping is
/// injective even on case-insensitive filesystems.
fn canonical_name(token: &str) -> String {
    if token.is_empty() {
        return "_".into();
    }
    let mut name = String::with_capacity(token.len());
    for byte in token.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => name.push(byte as char),
            other => name.push_str(&format!("_{other:02x}")),
        }
    }
    name
}

#[derive(Deserialize)]
struct OwnerHeader {
    owner_id: OwnerId,
}

fn stored_owner(path: &Path) -> Result<Option<OwnerId>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    match serde_json::from_str::<OwnerHeader>(&data) {
        Ok(header) => Ok(Some(header.owner_id)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "stored book is unreadable, overwriting it");
            Ok(None)
        }
    }
}
