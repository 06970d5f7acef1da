//! Command dispatch over the catalog service.
//!
//! # Responsibility
//! - Run boundary validation before any service call.
//! - Render results as pretty JSON on the provided writer.
//! - Map absent results and rejections to distinct outcomes.

use crate::cli::CatalogCommand;
use anyhow::Context;
use bookshelf_core::{BookInput, BookRepository, BookService};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;

/// How a command finished, independent of infrastructure failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
    Rejected,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::NotFound => ExitCode::from(1),
            Self::Rejected => ExitCode::from(2),
        }
    }
}

/// Executes one catalog command against `service`, writing JSON to `out`.
pub fn execute<R: BookRepository>(
    service: &BookService<R>,
    command: CatalogCommand,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match command {
        CatalogCommand::List => {
            let books = service.list_all().context("failed to list books")?;
            render(out, &books)?;
            Ok(Outcome::Done)
        }
        CatalogCommand::Get { id } => {
            let book = service
                .get_by_id(&id)
                .with_context(|| format!("failed to load book `{id}`"))?;
            render_optional(out, book)
        }
        CatalogCommand::Create(args) => match BookInput::from(args).validate() {
            Ok(draft) => {
                let book = service.create(draft).context("failed to create book")?;
                render(out, &book)?;
                Ok(Outcome::Done)
            }
            Err(rejection) => {
                render(out, &rejection)?;
                Ok(Outcome::Rejected)
            }
        },
        CatalogCommand::Update { id, book } => match BookInput::from(book).validate() {
            Ok(draft) => {
                let book = service
                    .update(&id, draft)
                    .with_context(|| format!("failed to update book `{id}`"))?;
                render_optional(out, book)
            }
            Err(rejection) => {
                render(out, &rejection)?;
                Ok(Outcome::Rejected)
            }
        },
        CatalogCommand::Delete { id } => {
            service
                .delete(&id)
                .with_context(|| format!("failed to delete book `{id}`"))?;
            Ok(Outcome::Done)
        }
        CatalogCommand::Search { title, author } => {
            let books = service
                .search(&title, &author)
                .context("failed to search books")?;
            render(out, &books)?;
            Ok(Outcome::Done)
        }
    }
}

fn render_optional<T: Serialize>(out: &mut impl Write, value: Option<T>) -> anyhow::Result<Outcome> {
    render(out, &value)?;
    Ok(if value.is_some() {
        Outcome::Done
    } else {
        Outcome::NotFound
    })
}

fn render<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode output")?;
    writeln!(out)?;
    Ok(())
}
