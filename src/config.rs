//! Configuration
//!
//! TigerStyle: Parse once, validate once, choose one backend for the
//! process lifetime.

use std::sync::Arc;

use board_core::{MemoryStore, PostStore, PostgresStore, DB_POOL_CONNECTIONS_MAX_DEFAULT};
use clap::Parser;

use crate::{APP_NAME, HTTP_BIND_ADDRESS_DEFAULT};

/// Which storage engine backs the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process maps, lost on exit
    Memory,
    /// PostgreSQL via sqlx
    Postgres,
}

impl BackendKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Posts with threaded comments over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = APP_NAME)]
#[command(about = "Posts with threaded, paginated comments")]
#[command(version)]
pub struct Cli {
    /// HTTP API bind address
    #[arg(short, long, default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    pub bind: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Use the in-memory store instead of Postgres
    #[arg(long)]
    pub use_memory: bool,

    /// Postgres connection URL (required unless --use-memory)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled Postgres connections
    #[arg(
        long,
        default_value_t = DB_POOL_CONNECTIONS_MAX_DEFAULT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: u32,
}

impl Cli {
    /// Backend selected by the flags.
    pub fn backend(&self) -> BackendKind {
        if self.use_memory {
            BackendKind::Memory
        } else {
            BackendKind::Postgres
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Open the backend chosen by `cli`.
///
/// # Errors
/// Fails when Postgres is selected without a URL or cannot be reached.
pub async fn open_store(cli: &Cli) -> anyhow::Result<Arc<dyn PostStore>> {
    match cli.backend() {
        BackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        BackendKind::Postgres => {
            let url = cli.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!(
                    "--database-url or DATABASE_URL is required unless --use-memory is set"
                )
            })?;
            let store = PostgresStore::new(url, cli.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
