//! Model - Posts and Comments
//!
//! TigerStyle: Explicit fields, flat canonical relation, derived children.

use serde::{Deserialize, Serialize};

use crate::constants::COMMENT_CONTENT_CHARS_MAX;
use crate::storage::{StoreError, StoreResult};

/// Post identifier, assigned by the backend.
pub type PostId = i64;

/// Comment identifier, assigned by the backend.
pub type CommentId = i64;

// =============================================================================
// Post
// =============================================================================

/// A post that owns a forest of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (positive)
    pub id: PostId,
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Author name
    pub author: String,
    /// Whether new comments are accepted. Never flips back to true.
    pub comments_enabled: bool,
    /// Paginated top-level comments. Only filled on the single-post read path.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a post with comments enabled and no comments attached.
    #[must_use]
    pub fn new(id: PostId, title: String, content: String, author: String) -> Self {
        assert!(id > 0, "post id must be positive, got {id}");

        Self {
            id,
            title,
            content,
            author,
            comments_enabled: true,
            comments: Vec::new(),
        }
    }

    /// Copy of this post with the comment view stripped.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            comments: Vec::new(),
            ..self.clone()
        }
    }
}

// =============================================================================
// Comment
// =============================================================================

/// A comment on a post, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier (positive)
    pub id: CommentId,
    /// Owning post. Immutable.
    pub post_id: PostId,
    /// Author name
    pub author: String,
    /// Body text, at most `COMMENT_CONTENT_CHARS_MAX` characters
    pub content: String,
    /// Comment this one replies to; `None` for top-level comments
    pub parent_id: Option<CommentId>,
    /// Replies, filled only during tree assembly
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Comment {
    /// Create a comment with no resolved children.
    ///
    /// # Panics
    /// Panics if ids are not positive or the comment is its own parent.
    #[must_use]
    pub fn new(
        id: CommentId,
        post_id: PostId,
        author: String,
        content: String,
        parent_id: Option<CommentId>,
    ) -> Self {
        // Preconditions
        assert!(id > 0, "comment id must be positive, got {id}");
        assert!(post_id > 0, "post id must be positive, got {post_id}");
        assert!(parent_id != Some(id), "comment {id} cannot be its own parent");

        Self {
            id,
            post_id,
            author,
            content,
            parent_id,
            children: Vec::new(),
        }
    }

    /// Check whether this comment sits at the top of its thread.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Copy of this comment with the children view stripped.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Reject content longer than `COMMENT_CONTENT_CHARS_MAX` characters.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] when the content is too long.
    pub fn validate_content(content: &str) -> StoreResult<()> {
        let chars = content.chars().count();
        if chars > COMMENT_CONTENT_CHARS_MAX {
            return Err(StoreError::validation(format!(
                "comment is too long: {chars} characters exceeds max {COMMENT_CONTENT_CHARS_MAX}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
