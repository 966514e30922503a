//! HTTP API for the trivia service.
//!
//! The server is generic over [`crate::db::Database`]; the binary picks the
//! concrete backend and hands it to [`run`].

mod handlers;
pub mod routes;
mod state;


use std::env;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use miette::Diagnostic;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::quiz::DEFAULT_QUESTIONS_PER_PAGE;

pub use state::AppState;

/// Environment variable overriding the default page size.
pub const QUESTIONS_PER_PAGE_ENV: &str = "TRIVIA_QUESTIONS_PER_PAGE";

/// Errors raised while starting or running the API server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind to {addr}: {source}")]
    #[diagnostic(
        code(trivia::api::bind),
        help("Check that the port is free or pick another one with --port")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(trivia::api::server))]
    Server(#[from] io::Error),
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// Serve the OpenAPI viewer at /docs
    pub enable_docs: bool,
    /// Page size when a request does not pass `per_page`
    pub questions_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            verbosity: 0,
            enable_docs: false,
            questions_per_page: DEFAULT_QUESTIONS_PER_PAGE,
        }
    }
}

impl Config {
    /// Defaults overlaid with environment variables.
    ///
    /// `TRIVIA_QUESTIONS_PER_PAGE` is honoured when it holds a positive integer.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Some(per_page) = env::var(QUESTIONS_PER_PAGE_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            config.questions_per_page = per_page;
        }
        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_docs(mut self, enable_docs: bool) -> Self {
        self.enable_docs = enable_docs;
        self
    }

    /// Override the page size. Zero is ignored.
    pub fn with_questions_per_page(mut self, per_page: usize) -> Self {
        if per_page > 0 {
            self.questions_per_page = per_page;
        }
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "trivia=info",
        1 => "trivia=debug,tower_http=debug",
        _ => "trace",
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity)));

    // A subscriber may already be installed when embedded in another process.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server with the given configuration
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ApiError> {
    init_tracing(config.verbosity);

    let state = AppState::new(db, config.questions_per_page);
    let app = routes::create_router(state, config.enable_docs);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!(
        per_page = config.questions_per_page,
        docs = config.enable_docs,
        "API server listening on http://{}",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
