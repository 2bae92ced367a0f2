//! Board Core - Posts and Threaded Comments
//!
//! TigerStyle: one storage contract, two engines, a flat canonical relation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Board Core                     │
//! ├─────────────────────────────────────────────┤
//! │  PostStore trait        │ Nine operations   │
//! │  MemoryStore            │ One RwLock        │
//! │  PostgresStore          │ sqlx::PgPool      │
//! ├─────────────────────────────────────────────┤
//! │  Tree assembly          │ Flat → forest     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Comments are persisted flat (`parent_id` only). The `children` of a
//! comment are a request-scoped view rebuilt by [`tree::assemble_forest`]
//! on every read and never written back.
//!
//! # Usage
//!
//! ```rust
//! use board_core::{MemoryStore, PostStore};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! let post = store.create_post("Hello", "First post", "alice").await.unwrap();
//! let root = store.create_comment(post.id, "bob", "Nice", None).await.unwrap();
//! store.create_comment(post.id, "alice", "Thanks", Some(root.id)).await.unwrap();
//!
//! let post = store.get_post(post.id, 0, 10).await.unwrap();
//! assert_eq!(post.comments.len(), 1);
//! assert_eq!(post.comments[0].children.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod model;
pub mod storage;
pub mod tree;

// Re-export common types
pub use constants::*;
pub use model::{Comment, CommentId, Post, PostId};
pub use storage::{EntityKind, MemoryStore, PostStore, StoreError, StoreResult};

#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
