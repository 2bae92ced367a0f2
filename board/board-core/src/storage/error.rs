//! Storage Errors
//!
//! TigerStyle: A closed taxonomy the transport layer can map one-to-one.

use std::fmt;

/// Which kind of record an operation failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A post
    Post,
    /// A comment addressed directly
    Comment,
    /// A comment referenced as the parent of a new comment
    ParentComment,
}

impl EntityKind {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::ParentComment => "parent comment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by every [`super::PostStore`] operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing post, comment, or parent comment
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up
        kind: EntityKind,
        /// The id that matched nothing
        id: i64,
    },

    /// Content over the length limit
    #[error("validation failed: {0}")]
    Validation(String),

    /// Commenting on a post with comments disabled
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Backend I/O or connectivity failure
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Post with `id` does not exist.
    #[must_use]
    pub fn post_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Post,
            id,
        }
    }

    /// Comment with `id` does not exist.
    #[must_use]
    pub fn comment_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Comment,
            id,
        }
    }

    /// Referenced parent comment does not exist.
    #[must_use]
    pub fn parent_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::ParentComment,
            id,
        }
    }

    /// Input rejected before touching storage.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Operation not allowed in the record's current state.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Backend I/O or connectivity failure.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Check if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a forbidden error.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if the backend itself failed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
