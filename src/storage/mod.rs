pub mod json_backend;

use crate::{core::errors::Result, ledger::Book};

pub use json_backend::{BackupInfo, JsonStorage};

/// Abstraction over persistence backends capable of storing books and their backups.
pub trait PlanStorage {
    fn save_book(&self, name: &str, book: &Book) -> Result<()>;
    /// Loads a stored book. Missing books are reported as `NotFound`.
    fn load_book(&self, name: &str) -> Result<Book>;
    fn list_books(&self) -> Result<Vec<String>>;
    fn delete_book(&self, name: &str) -> Result<()>;
    fn backup_book(&self, name: &str, book: &Book, note: Option<&str>) -> Result<BackupInfo>;
    /// Backups for a book, newest first.
    fn list_backups(&self, name: &str) -> Result<Vec<BackupInfo>>;
    fn restore_backup(&self, backup: &BackupInfo) -> Result<Book>;

    /// Loads the named book, or returns a fresh empty one when it has never been saved.
    fn load_or_create(&self, name: &str) -> Result<Book> {
        match self.load_book(name) {
            Ok(book) => Ok(book),
            Err(err) if err.is_not_found() => Ok(Book::new(name)),
            Err(err) => Err(err),
        }
    }
}
