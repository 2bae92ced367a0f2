//! Postboard - Posts with Threaded Comments
//!
//! Service shell around `board-core`:
//! - Backend selection at startup (volatile or Postgres)
//! - Thin JSON/HTTP surface over the nine store operations
//! - Structured logging via `tracing`

pub mod api;
pub mod config;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Default HTTP bind address
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:8080";

/// Application name
pub const APP_NAME: &str = "postboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
