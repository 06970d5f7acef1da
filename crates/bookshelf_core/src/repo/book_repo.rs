//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the record store capability the catalog service depends on.
//! - Provide the SQLite-backed store over the `books` table.
//!
//! # Invariants
//! - `save` is insert-or-replace keyed by id and assigns an id when absent.
//! - Write paths call `BookDraft::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Substring matching is case-sensitive; an empty fragment matches all rows.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, BookValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    publish_year,
    isbn
FROM books";

const REQUIRED_BOOK_COLUMNS: &[&str] = &["id", "title", "author", "publish_year", "isbn"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Infrastructure-level error for book persistence and query operations.
///
/// None of these variants describe a missing record: absence is reported as
/// `Ok(None)` / `Ok(false)` by the lookup methods.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::LockPoisoned => write!(f, "in-memory book store lock is poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store capability required by the catalog service.
pub trait BookRepository {
    /// Inserts or fully replaces a book, assigning an id when the draft has none.
    fn save(&self, draft: BookDraft) -> RepoResult<Book>;
    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>>;
    fn exists_by_id(&self, id: &str) -> RepoResult<bool>;
    /// Removes the book if present; missing ids are not an error.
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    /// Returns books whose title contains `title` OR whose author contains `author`.
    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>>;
}

impl<R: BookRepository + ?Sized> BookRepository for &R {
    fn save(&self, draft: BookDraft) -> RepoResult<Book> {
        (**self).save(draft)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        (**self).find_by_id(id)
    }

    fn exists_by_id(&self, id: &str) -> RepoResult<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        (**self).find_all()
    }

    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>> {
        (**self).find_by_title_containing_or_author_containing(title, author)
    }
}

/// Generates a fresh opaque book id.
pub fn generate_book_id() -> BookId {
    Uuid::new_v4().to_string()
}

/// Shared search predicate: `title contains t OR author contains a`.
pub fn matches_title_or_author(book: &Book, title: &str, author: &str) -> bool {
    book.title.contains(title) || book.author.contains(author)
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection after verifying it carries the catalog schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `Db(UnsupportedSchemaVersion)` when the schema is newer than supported.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version > expected_version {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: actual_version,
                latest_supported: expected_version,
            }
            .into());
        }
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_books_schema(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save(&self, draft: BookDraft) -> RepoResult<Book> {
        draft.validate()?;

        let id = draft.id.clone().unwrap_or_else(generate_book_id);
        self.conn.execute(
            "INSERT INTO books (id, title, author, publish_year, isbn)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                author = excluded.author,
                publish_year = excluded.publish_year,
                isbn = excluded.isbn,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                id.as_str(),
                draft.title.as_str(),
                draft.author.as_str(),
                draft.publish_year,
                draft.isbn.as_deref(),
            ],
        )?;

        Ok(draft.into_book(id))
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn exists_by_id(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_books(&mut rows)
    }

    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>> {
        // instr() is case-sensitive, unlike LIKE, and has no wildcard escaping.
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE (?1 = '' OR instr(title, ?1) > 0)
                OR (?2 = '' OR instr(author, ?2) > 0)
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query(params![title, author])?;
        collect_books(&mut rows)
    }
}

fn collect_books(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        publish_year: row.get("publish_year")?,
        isbn: row.get("isbn")?,
    };
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("row `{}` in books: {err}", book.id))
    })?;
    Ok(book)
}

fn ensure_books_schema(conn: &Connection) -> RepoResult<()> {
    let table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'books';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(RepoError::MissingRequiredTable("books"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(books);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in REQUIRED_BOOK_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }

    Ok(())
}
