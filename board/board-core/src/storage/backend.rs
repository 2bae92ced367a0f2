//! PostStore - The Storage Contract
//!
//! TigerStyle: Every backend answers the same nine questions the same way.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::model::{Comment, CommentId, Post, PostId};

/// Capability interface implemented by every storage engine.
///
/// Callers hand in already type-checked scalars. Pagination (`offset`,
/// `limit`) applies to top-level comments only; see
/// [`crate::tree::assemble_forest`].
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, without comments, in ascending id order.
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// One post with its paginated comment forest attached.
    ///
    /// # Errors
    /// `NotFound` if no post has `id`.
    async fn get_post(&self, id: PostId, offset: usize, limit: usize) -> StoreResult<Post>;

    /// The paginated comment forest of a post.
    ///
    /// An unknown `post_id` yields an empty forest rather than `NotFound`,
    /// unlike [`PostStore::get_post`].
    async fn get_comments(
        &self,
        post_id: PostId,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<Comment>>;

    /// One comment, children unresolved.
    ///
    /// # Errors
    /// `NotFound` if no comment has `id`.
    async fn get_comment(&self, id: CommentId) -> StoreResult<Comment>;

    /// Create a post with comments enabled.
    async fn create_post(&self, title: &str, content: &str, author: &str) -> StoreResult<Post>;

    /// Create a comment, top-level when `parent_id` is `None`.
    ///
    /// # Errors
    /// Checked in order: `Validation` for over-long content, `NotFound`
    /// for a missing post, `Forbidden` when the post has comments
    /// disabled, `NotFound` for a missing parent.
    async fn create_comment(
        &self,
        post_id: PostId,
        author: &str,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> StoreResult<Comment>;

    /// Replace title and content. Author and `comments_enabled` are untouched.
    ///
    /// # Errors
    /// `NotFound` if no post has `id`.
    async fn update_post(&self, id: PostId, title: &str, content: &str) -> StoreResult<Post>;

    /// Replace comment content.
    ///
    /// # Errors
    /// `Validation` for over-long content, `NotFound` if no comment has `id`.
    async fn update_comment(&self, id: CommentId, content: &str) -> StoreResult<Comment>;

    /// Turn commenting off for a post. Idempotent.
    ///
    /// # Errors
    /// `NotFound` if no post has `post_id`.
    async fn disable_comments(&self, post_id: PostId) -> StoreResult<()>;
}
