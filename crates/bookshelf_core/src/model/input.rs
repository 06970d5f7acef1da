//! Boundary input and structured validation rejection.
//!
//! # Responsibility
//! - Accept untrusted caller payloads in wire shape.
//! - Run explicit guard checks before any core operation is invoked.
//!
//! # Invariants
//! - `BookInput::validate` reports every violated field, not only the first.
//! - A successful check always yields a `BookDraft` that passes
//!   `BookDraft::validate`.
//! - The core service never calls into this module.

use super::book::{is_blank, is_valid_isbn, BookDraft, BookId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_MANDATORY: &str = "Title is mandatory";
pub const AUTHOR_MANDATORY: &str = "Author is mandatory";
pub const PUBLISH_YEAR_MANDATORY: &str = "Publish Year is mandatory";
pub const ISBN_INVALID: &str = "ISBN should be valid";

/// Untrusted book payload as received from a caller.
///
/// Every field is optional on the wire so that missing values can be reported
/// as violations instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    /// Caller-supplied id. Not trusted: create ignores it, update overrides it.
    #[serde(default)]
    pub id: Option<BookId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publish_year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
}

/// One rejected field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Structured rejection returned by boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRejection {
    pub violations: Vec<FieldViolation>,
}

impl ValidationRejection {
    /// Returns whether `field` is among the rejected fields.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|item| item.field == field)
    }
}

impl Display for ValidationRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let details = self
            .violations
            .iter()
            .map(|item| format!("{}: {}", item.field, item.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid book input: {details}")
    }
}

impl Error for ValidationRejection {}

impl BookInput {
    /// Checks the payload and converts it into a typed draft.
    ///
    /// # Rules
    /// - `title`, `author`: present and not blank.
    /// - `publishYear`: present; any integer accepted.
    /// - `isbn`: optional; when present must match `^[0-9-]+$`.
    pub fn validate(self) -> Result<BookDraft, ValidationRejection> {
        let mut violations = Vec::new();

        if self.title.as_deref().map_or(true, is_blank) {
            violations.push(FieldViolation {
                field: "title",
                message: TITLE_MANDATORY,
            });
        }
        if self.author.as_deref().map_or(true, is_blank) {
            violations.push(FieldViolation {
                field: "author",
                message: AUTHOR_MANDATORY,
            });
        }
        if self.publish_year.is_none() {
            violations.push(FieldViolation {
                field: "publishYear",
                message: PUBLISH_YEAR_MANDATORY,
            });
        }
        if let Some(isbn) = self.isbn.as_deref() {
            if !is_valid_isbn(isbn) {
                violations.push(FieldViolation {
                    field: "isbn",
                    message: ISBN_INVALID,
                });
            }
        }

        match (self.title, self.author, self.publish_year) {
            (Some(title), Some(author), Some(publish_year)) if violations.is_empty() => {
                Ok(BookDraft {
                    id: self.id,
                    title,
                    author,
                    publish_year,
                    isbn: self.isbn,
                })
            }
            _ => Err(ValidationRejection { violations }),
        }
    }
}
