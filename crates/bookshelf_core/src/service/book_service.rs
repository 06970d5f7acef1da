//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete/search entry points over books.
//! - Apply identity assignment and update-existence policy.
//! - Delegate persistence to a `BookRepository` chosen by the caller.
//!
//! # Invariants
//! - Input is validated at the boundary; this layer does not re-validate.
//! - `create` never trusts a caller-supplied id.
//! - `update` never creates: a missing id yields `Ok(None)` and no write.
//! - Store errors propagate unchanged and are never retried.
//!
//! # Concurrency
//! `update` is check-then-write and not atomic. A delete landing between the
//! existence check and the save resurrects the record, and two concurrent
//! updates to the same id both succeed with last-write-wins. Stores that need
//! stronger guarantees must provide them below this layer.

use crate::model::book::{Book, BookDraft};
use crate::repo::book_repo::{BookRepository, RepoResult};
use log::{debug, info};

/// Use-case service wrapper for catalog operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists every stored book in store-defined order.
    pub fn list_all(&self) -> RepoResult<Vec<Book>> {
        self.repo.find_all()
    }

    /// Gets one book by id; `Ok(None)` when absent.
    pub fn get_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        self.repo.find_by_id(id)
    }

    /// Persists a new book and returns it with its store-assigned id.
    ///
    /// # Contract
    /// - Any id carried by `draft` is discarded before saving.
    pub fn create(&self, mut draft: BookDraft) -> RepoResult<Book> {
        draft.id = None;
        let book = self.repo.save(draft)?;
        info!("event=book_create module=service status=ok book_id={}", book.id);
        Ok(book)
    }

    /// Fully replaces the book stored under `id`.
    ///
    /// # Contract
    /// - Returns `Ok(None)` without writing when `id` does not exist.
    /// - Otherwise forces `draft.id = id`, saves, and returns the stored book.
    pub fn update(&self, id: &str, mut draft: BookDraft) -> RepoResult<Option<Book>> {
        if !self.repo.exists_by_id(id)? {
            info!("event=book_update module=service status=not_found book_id={id}");
            return Ok(None);
        }

        if draft.id.as_deref().is_some_and(|body_id| body_id != id) {
            debug!("event=book_update module=service status=id_overridden book_id={id}");
        }
        draft.id = Some(id.to_string());
        let book = self.repo.save(draft)?;
        info!("event=book_update module=service status=ok book_id={}", book.id);
        Ok(Some(book))
    }

    /// Removes the book stored under `id`; missing ids are a no-op.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=book_delete module=service status=ok book_id={id}");
        Ok(())
    }

    /// Returns books whose title contains `title_fragment` OR whose author
    /// contains `author_fragment`.
    ///
    /// Matching is case-sensitive and an empty fragment matches every book.
    pub fn search(&self, title_fragment: &str, author_fragment: &str) -> RepoResult<Vec<Book>> {
        self.repo
            .find_by_title_containing_or_author_containing(title_fragment, author_fragment)
    }
}
