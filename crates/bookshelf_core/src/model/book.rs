//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted catalog record and the draft payload stores accept.
//! - Own the field-level invariants shared by every store implementation.
//!
//! # Invariants
//! - A persisted `Book` always carries an `id`.
//! - `title` and `author` are never blank.
//! - `isbn`, when present, consists only of digits and hyphens.
//! - Nothing beyond `id` is unique; duplicate titles and ISBNs are allowed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9-]+$").expect("valid isbn regex"));

/// Opaque store-assigned identifier.
///
/// Kept as a type alias so signatures read in domain terms while any store
/// backend is free to choose its own id format.
pub type BookId = String;

/// Field-level invariant violations for book records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    BlankTitle,
    BlankAuthor,
    InvalidIsbn(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "book title must not be blank"),
            Self::BlankAuthor => write!(f, "book author must not be blank"),
            Self::InvalidIsbn(value) => {
                write!(f, "isbn `{value}` must contain only digits and hyphens")
            }
        }
    }
}

impl Error for BookValidationError {}

/// Canonical persisted catalog record.
///
/// Serialized with camelCase keys (`publishYear`) to match the document shape
/// used by external callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publish_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl Book {
    /// Checks field invariants for a record that claims to be persisted.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.isbn.as_deref())
    }
}

/// Validated payload handed to a store `save`.
///
/// `id = None` asks the store to assign a fresh identifier; `Some(id)`
/// replaces the record stored under that id (or inserts it when missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub publish_year: i32,
    pub isbn: Option<String>,
}

impl BookDraft {
    /// Creates a draft without id or ISBN.
    pub fn new(title: impl Into<String>, author: impl Into<String>, publish_year: i32) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            publish_year,
            isbn: None,
        }
    }

    /// Sets the ISBN, returning the updated draft.
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Sets the id, returning the updated draft.
    pub fn with_id(mut self, id: impl Into<BookId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Checks the same field invariants enforced on persisted books.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.isbn.as_deref())
    }

    /// Materializes the draft as a persisted record under `id`.
    ///
    /// Any id already carried by the draft is discarded.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publish_year: self.publish_year,
            isbn: self.isbn,
        }
    }
}

/// Returns whether `value` is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns whether `value` matches the accepted ISBN shape `^[0-9-]+$`.
///
/// Only the character class is checked; checksums are not.
pub fn is_valid_isbn(value: &str) -> bool {
    ISBN_RE.is_match(value)
}

fn validate_fields(
    title: &str,
    author: &str,
    isbn: Option<&str>,
) -> Result<(), BookValidationError> {
    if is_blank(title) {
        return Err(BookValidationError::BlankTitle);
    }
    if is_blank(author) {
        return Err(BookValidationError::BlankAuthor);
    }
    if let Some(isbn) = isbn {
        if !is_valid_isbn(isbn) {
            return Err(BookValidationError::InvalidIsbn(isbn.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_isbn, BookDraft, BookValidationError};

    #[test]
    fn isbn_shape_accepts_digits_and_hyphens_only() {
        assert!(is_valid_isbn("978-3-16-148410-0"));
        assert!(is_valid_isbn("232434"));
        assert!(is_valid_isbn("-"));
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn("12345X"));
        assert!(!is_valid_isbn("978 3 16"));
    }

    #[test]
    fn draft_validate_reports_first_violation() {
        let err = BookDraft::new(" ", "", 2001).validate().unwrap_err();
        assert_eq!(err, BookValidationError::BlankTitle);

        let err = BookDraft::new("Dune", "\t", 1965).validate().unwrap_err();
        assert_eq!(err, BookValidationError::BlankAuthor);

        let err = BookDraft::new("Dune", "Frank Herbert", 1965)
            .with_isbn("abc")
            .validate()
            .unwrap_err();
        assert_eq!(err, BookValidationError::InvalidIsbn("abc".to_string()));
    }

    #[test]
    fn into_book_replaces_draft_id() {
        let book = BookDraft::new("Dune", "Frank Herbert", 1965)
            .with_id("caller-id")
            .into_book("store-id".to_string());
        assert_eq!(book.id, "store-id");
        assert_eq!(book.title, "Dune");
    }
}
