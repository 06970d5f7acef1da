//! Bookshelf command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Choose the record store at startup and pass it into the service.
//! - Translate command outcomes into process exit codes.

mod cli;
mod commands;

use anyhow::Context;
use bookshelf_core::db::{open_db, open_db_in_memory};
use bookshelf_core::{default_log_level, init_logging, BookService, SqliteBookRepository};
use clap::Parser;
use cli::{Cli, Commands};
use commands::Outcome;
use log::info;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let mut stdout = std::io::stdout().lock();
    let command = match cli.command {
        Commands::Ping => {
            writeln!(stdout, "{}", bookshelf_core::ping())?;
            return Ok(Outcome::Done);
        }
        Commands::Version => {
            writeln!(stdout, "{}", bookshelf_core::core_version())?;
            return Ok(Outcome::Done);
        }
        Commands::Catalog(command) => command,
    };

    let conn = if cli.in_memory {
        open_db_in_memory().context("failed to open in-memory database")?
    } else {
        open_db(&cli.db)
            .with_context(|| format!("failed to open database `{}`", cli.db.display()))?
    };
    let repo = SqliteBookRepository::try_new(&conn).context("database is not a bookshelf store")?;
    let service = BookService::new(repo);

    let outcome = commands::execute(&service, command, &mut stdout)?;
    info!("event=cli_command module=cli status=ok outcome={outcome:?}");
    Ok(outcome)
}
