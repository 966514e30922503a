//! Trivia API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use trivia::api::{self, ApiError, Config};
use trivia::db::{Database, DbError, SqliteDatabase};
use trivia::paths::get_db_path;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(trivia::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(trivia::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(trivia::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "trivia-api")]
#[command(author, version, about = "Trivia API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Database file path (defaults to XDG data directory: ~/.local/share/trivia/trivia.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Questions per page when a request does not say (default: TRIVIA_QUESTIONS_PER_PAGE env or 10)
    #[arg(long)]
    per_page: Option<usize>,

    /// Serve the OpenAPI viewer at /docs
    #[arg(long)]
    docs: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    // Create the concrete database implementation
    let db_path = cli.db.unwrap_or_else(get_db_path);

    println!("Opening database at {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    let mut config = Config::new()
        .with_host(cli.host)
        .with_port(cli.port)
        .with_verbosity(cli.verbose)
        .with_docs(cli.docs);
    if let Some(per_page) = cli.per_page {
        config = config.with_questions_per_page(per_page);
    }

    // Pass the abstract Database to the API layer
    api::run(config, db).await?;

    Ok(())
}
