//! In-process book store.
//!
//! # Responsibility
//! - Satisfy the `BookRepository` contract without any external storage.
//! - Serve embedding callers and tests that do not need durability.
//!
//! # Invariants
//! - Rows are kept in insertion order; a replace keeps the original position.
//! - Every operation holds the lock for its whole duration, so a single call
//!   is atomic. Sequences of calls are not.

use super::book_repo::{
    generate_book_id, matches_title_or_author, BookRepository, RepoError, RepoResult,
};
use crate::model::book::{Book, BookDraft};
use std::sync::{Mutex, MutexGuard};

/// Mutex-guarded in-memory book store.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    rows: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Vec<Book>>> {
        self.rows.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl BookRepository for InMemoryBookRepository {
    fn save(&self, draft: BookDraft) -> RepoResult<Book> {
        draft.validate()?;

        let id = draft.id.clone().unwrap_or_else(generate_book_id);
        let book = draft.into_book(id);
        let mut rows = self.lock()?;
        match rows.iter().position(|row| row.id == book.id) {
            Some(index) => rows[index] = book.clone(),
            None => rows.push(book.clone()),
        }
        Ok(book)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        Ok(self.lock()?.iter().find(|row| row.id == id).cloned())
    }

    fn exists_by_id(&self, id: &str) -> RepoResult<bool> {
        Ok(self.lock()?.iter().any(|row| row.id == id))
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.lock()?.retain(|row| row.id != id);
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        Ok(self.lock()?.clone())
    }

    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|row| matches_title_or_author(row, title, author))
            .cloned()
            .collect())
    }
}
