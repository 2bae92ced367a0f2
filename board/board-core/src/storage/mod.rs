//! Storage - Contract and Backends
//!
//! TigerStyle: One contract, two engines, chosen once at startup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PostStore Trait                         │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │   MemoryStore   │           │  PostgresStore  │
//! │   (volatile)    │           │    (durable)    │
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! Both engines persist comments flat and rebuild the forest on read
//! through [`crate::tree::assemble_forest`].

mod backend;
mod error;
mod memory;

#[cfg(feature = "postgres")]
mod postgres;

pub use backend::PostStore;
pub use error::{EntityKind, StoreError, StoreResult};
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
