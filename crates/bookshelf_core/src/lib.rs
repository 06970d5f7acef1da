//! Core catalog logic for Bookshelf.
//! This crate is the single source of truth for book invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookDraft, BookId, BookValidationError};
pub use model::input::{BookInput, FieldViolation, ValidationRejection};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use repo::memory_repo::InMemoryBookRepository;
pub use service::book_service::BookService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
