use bookshelf_core::BookInput;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf: manage a catalog of book records
#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "Manage a catalog of book records")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "BOOKSHELF_DB", default_value = "bookshelf.sqlite3")]
    pub db: PathBuf,

    /// Use a transient in-memory database instead of --db
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Log level (trace|debug|info|warn|error); defaults per build mode
    #[arg(long, global = true, env = "BOOKSHELF_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "BOOKSHELF_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prints a liveness probe
    Ping,

    /// Prints the core library version
    Version,

    #[command(flatten)]
    Catalog(CatalogCommand),
}

/// Commands that need an open record store.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Lists every book
    List,

    /// Shows one book by id
    Get { id: String },

    /// Adds a new book
    Create(BookArgs),

    /// Replaces every field of an existing book
    Update {
        id: String,

        #[command(flatten)]
        book: BookArgs,
    },

    /// Removes a book; missing ids are ignored
    Delete { id: String },

    /// Finds books whose title OR author contains the given text
    Search {
        /// Title fragment (case-sensitive)
        #[arg(long, default_value = "")]
        title: String,

        /// Author fragment (case-sensitive)
        #[arg(long, default_value = "")]
        author: String,
    },
}

/// Book fields as typed on the command line.
///
/// Every field is optional here so that missing values surface as structured
/// validation violations rather than parser errors.
#[derive(Debug, Clone, Default, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub publish_year: Option<i32>,

    #[arg(long)]
    pub isbn: Option<String>,
}

impl From<BookArgs> for BookInput {
    fn from(args: BookArgs) -> Self {
        BookInput {
            id: None,
            title: args.title,
            author: args.author,
            publish_year: args.publish_year,
            isbn: args.isbn,
        }
    }
}
