//! TigerStyle Constants
//!
//! Every limit has a name, a unit suffix, and lives here.

/// Maximum comment content length, counted in Unicode scalar values.
pub const COMMENT_CONTENT_CHARS_MAX: usize = 2000;

/// Page size used when a caller does not supply a comment limit.
pub const COMMENTS_PAGE_LIMIT_DEFAULT: usize = 10;

/// Default size of the durable backend's connection pool.
pub const DB_POOL_CONNECTIONS_MAX_DEFAULT: u32 = 10;

/// First identifier handed out for posts and comments.
pub const ID_FIRST: i64 = 1;
