//! MemoryStore - Volatile Backend
//!
//! TigerStyle: Both tables behind one lock, validation inside the write lock.
//!
//! Identifiers are `table size + ID_FIRST`. That is only sound because nothing is
//! ever deleted; adding deletion requires a dedicated counter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::PostStore;
use super::error::{StoreError, StoreResult};
use crate::constants::ID_FIRST;
use crate::model::{Comment, CommentId, Post, PostId};
use crate::tree::assemble_forest;

// =============================================================================
// Tables
// =============================================================================

/// Canonical records. Comments are stored flat; `children` stays empty.
#[derive(Debug, Default)]
struct Tables {
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
}

impl Tables {
    fn next_post_id(&self) -> PostId {
        self.posts.len() as PostId + ID_FIRST
    }

    fn next_comment_id(&self) -> CommentId {
        self.comments.len() as CommentId + ID_FIRST
    }

    fn forest(&self, post_id: PostId, offset: usize, limit: usize) -> Vec<Comment> {
        let flat: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        assemble_forest(flat, offset, limit)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process store guarded by a single reader/writer lock.
///
/// Reads share the lock; every mutation holds it exclusively for its whole
/// check-then-act sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of posts held.
    pub async fn post_count(&self) -> usize {
        self.tables.read().await.posts.len()
    }

    /// Number of comments held, across all posts.
    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().map(Post::detached).collect())
    }

    async fn get_post(&self, id: PostId, offset: usize, limit: usize) -> StoreResult<Post> {
        let tables = self.tables.read().await;

        let mut post = tables
            .posts
            .get(&id)
            .map(Post::detached)
            .ok_or_else(|| StoreError::post_not_found(id))?;
        post.comments = tables.forest(id, offset, limit);

        Ok(post)
    }

    async fn get_comments(
        &self,
        post_id: PostId,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.forest(post_id, offset, limit))
    }

    async fn get_comment(&self, id: CommentId) -> StoreResult<Comment> {
        let tables = self.tables.read().await;
        tables
            .comments
            .get(&id)
            .map(Comment::detached)
            .ok_or_else(|| StoreError::comment_not_found(id))
    }

    async fn create_post(&self, title: &str, content: &str, author: &str) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;

        let id = tables.next_post_id();
        assert!(!tables.posts.contains_key(&id), "post id {id} already taken");

        let post = Post::new(id, title.to_string(), content.to_string(), author.to_string());
        tables.posts.insert(id, post.clone());

        tracing::debug!(post_id = id, "Created post");
        Ok(post)
    }

    async fn create_comment(
        &self,
        post_id: PostId,
        author: &str,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> StoreResult<Comment> {
        Comment::validate_content(content)?;

        let mut tables = self.tables.write().await;

        let post = tables
            .posts
            .get(&post_id)
            .ok_or_else(|| StoreError::post_not_found(post_id))?;
        if !post.comments_enabled {
            tracing::warn!(post_id, "Rejected comment on post with comments disabled");
            return Err(StoreError::forbidden(format!(
                "comments are disabled for post {post_id}"
            )));
        }

        // Cross-post parents are accepted as-is
        if let Some(parent_id) = parent_id {
            if !tables.comments.contains_key(&parent_id) {
                return Err(StoreError::parent_not_found(parent_id));
            }
        }

        let id = tables.next_comment_id();
        assert!(!tables.comments.contains_key(&id), "comment id {id} already taken");

        let comment = Comment::new(id, post_id, author.to_string(), content.to_string(), parent_id);
        tables.comments.insert(id, comment.clone());

        tracing::debug!(post_id, comment_id = id, ?parent_id, "Created comment");
        Ok(comment)
    }

    async fn update_post(&self, id: PostId, title: &str, content: &str) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;

        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| StoreError::post_not_found(id))?;
        post.title = title.to_string();
        post.content = content.to_string();

        tracing::debug!(post_id = id, "Updated post");
        Ok(post.detached())
    }

    async fn update_comment(&self, id: CommentId, content: &str) -> StoreResult<Comment> {
        Comment::validate_content(content)?;

        let mut tables = self.tables.write().await;

        let comment = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| StoreError::comment_not_found(id))?;
        comment.content = content.to_string();

        tracing::debug!(comment_id = id, "Updated comment");
        Ok(comment.detached())
    }

    async fn disable_comments(&self, post_id: PostId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        let post = tables
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| StoreError::post_not_found(post_id))?;
        post.comments_enabled = false;

        tracing::debug!(post_id, "Disabled comments");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COMMENT_CONTENT_CHARS_MAX;
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn store_with_post() -> (MemoryStore, Post) {
        let store = MemoryStore::new();
        let post = store.create_post("Title", "Content", "Author").await.unwrap();
        (store, post)
    }

    #[tokio::test]
    async fn test_create_and_list_posts() {
        let store = MemoryStore::new();
        store.create_post("Post 1", "Body 1", "a").await.unwrap();
        store.create_post("Post 2", "Body 2", "b").await.unwrap();

        let posts = store.list_posts().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "Post 2");
        assert!(posts.iter().all(|p| p.comments.is_empty()));
    }

    #[tokio::test]
    async fn test_create_post_defaults() {
        let (_, post) = store_with_post().await;

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Content");
        assert_eq!(post.author, "Author");
        assert!(post.comments_enabled);
    }

    #[tokio::test]
    async fn test_list_posts_omits_comments() {
        let (store, post) = store_with_post().await;
        store.create_comment(post.id, "c", "hi", None).await.unwrap();

        let posts = store.list_posts().await.unwrap();

        assert!(posts[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let store = MemoryStore::new();

        let err = store.get_post(42, 0, 10).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_post_attaches_forest() {
        let (store, post) = store_with_post().await;
        let root = store.create_comment(post.id, "a", "root", None).await.unwrap();
        store
            .create_comment(post.id, "b", "reply", Some(root.id))
            .await
            .unwrap();
        store.create_comment(post.id, "c", "second", None).await.unwrap();

        let fetched = store.get_post(post.id, 0, 10).await.unwrap();

        assert_eq!(fetched.comments.len(), 2);
        assert_eq!(fetched.comments[0].id, root.id);
        assert_eq!(fetched.comments[0].children.len(), 1);
        assert_eq!(fetched.comments[0].children[0].content, "reply");
        assert!(fetched.comments[1].children.is_empty());
    }

    #[tokio::test]
    async fn test_get_comments_paginates_roots() {
        let (store, post) = store_with_post().await;
        for i in 1..=5 {
            store
                .create_comment(post.id, "a", &format!("c{i}"), None)
                .await
                .unwrap();
        }

        let page = store.get_comments(post.id, 2, 2).await.unwrap();
        let ids: Vec<CommentId> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let past_end = store.get_comments(post.id, 10, 2).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_get_comments_unknown_post_is_empty() {
        let store = MemoryStore::new();

        let comments = store.get_comments(99, 0, 10).await.unwrap();

        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_get_comments_scoped_to_post() {
        let store = MemoryStore::new();
        let first = store.create_post("1", "1", "a").await.unwrap();
        let second = store.create_post("2", "2", "a").await.unwrap();
        store.create_comment(first.id, "a", "on first", None).await.unwrap();
        store.create_comment(second.id, "a", "on second", None).await.unwrap();

        let comments = store.get_comments(second.id, 0, 10).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "on second");
    }

    #[tokio::test]
    async fn test_create_then_get_comment() {
        let (store, post) = store_with_post().await;
        let root = store.create_comment(post.id, "a", "root", None).await.unwrap();
        let reply = store
            .create_comment(post.id, "b", "reply", Some(root.id))
            .await
            .unwrap();

        let fetched = store.get_comment(reply.id).await.unwrap();

        assert_eq!(fetched.post_id, post.id);
        assert_eq!(fetched.author, "b");
        assert_eq!(fetched.content, "reply");
        assert_eq!(fetched.parent_id, Some(root.id));
        assert!(fetched.children.is_empty());
    }

    #[tokio::test]
    async fn test_get_comment_children_unresolved() {
        let (store, post) = store_with_post().await;
        let root = store.create_comment(post.id, "a", "root", None).await.unwrap();
        store
            .create_comment(post.id, "b", "reply", Some(root.id))
            .await
            .unwrap();

        let fetched = store.get_comment(root.id).await.unwrap();

        assert!(fetched.children.is_empty());
    }

    #[tokio::test]
    async fn test_get_comment_not_found() {
        let store = MemoryStore::new();
        assert!(store.get_comment(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_comment_too_long() {
        let (store, post) = store_with_post().await;
        let content = "x".repeat(COMMENT_CONTENT_CHARS_MAX + 1);

        let err = store
            .create_comment(post.id, "a", &content, None)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.comment_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_comment_validation_precedes_lookup() {
        let store = MemoryStore::new();
        let content = "x".repeat(COMMENT_CONTENT_CHARS_MAX + 1);

        let err = store.create_comment(7, "a", &content, None).await.unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_create_comment_missing_post() {
        let store = MemoryStore::new();

        let err = store.create_comment(7, "a", "hi", None).await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: crate::storage::EntityKind::Post,
                id: 7
            }
        ));
    }

    #[tokio::test]
    async fn test_create_comment_missing_parent() {
        let (store, post) = store_with_post().await;

        let err = store
            .create_comment(post.id, "a", "orphan", Some(99))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: crate::storage::EntityKind::ParentComment,
                id: 99
            }
        ));
        assert_eq!(store.comment_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_comment_after_disable_forbidden() {
        let (store, post) = store_with_post().await;
        store.disable_comments(post.id).await.unwrap();

        let err = store.create_comment(post.id, "a", "hi", None).await.unwrap_err();

        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn test_disable_comments_idempotent() {
        let (store, post) = store_with_post().await;

        store.disable_comments(post.id).await.unwrap();
        assert!(!store.get_post(post.id, 0, 10).await.unwrap().comments_enabled);

        store.disable_comments(post.id).await.unwrap();
        assert!(!store.get_post(post.id, 0, 10).await.unwrap().comments_enabled);
    }

    #[tokio::test]
    async fn test_disable_comments_not_found() {
        let store = MemoryStore::new();
        assert!(store.disable_comments(3).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_post_keeps_author_and_flag() {
        let (store, post) = store_with_post().await;
        store.disable_comments(post.id).await.unwrap();

        let updated = store
            .update_post(post.id, "Updated Title", "Updated Content")
            .await
            .unwrap();

        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.content, "Updated Content");
        assert_eq!(updated.author, "Author");
        assert!(!updated.comments_enabled);
    }

    #[tokio::test]
    async fn test_update_post_not_found() {
        let store = MemoryStore::new();
        assert!(store.update_post(1, "t", "c").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_comment() {
        let (store, post) = store_with_post().await;
        let comment = store.create_comment(post.id, "a", "before", None).await.unwrap();

        let updated = store.update_comment(comment.id, "after").await.unwrap();

        assert_eq!(updated.id, comment.id);
        assert_eq!(updated.content, "after");
        assert_eq!(store.get_comment(comment.id).await.unwrap().content, "after");
    }

    #[tokio::test]
    async fn test_update_comment_errors() {
        let (store, post) = store_with_post().await;
        let comment = store.create_comment(post.id, "a", "before", None).await.unwrap();
        let too_long = "x".repeat(COMMENT_CONTENT_CHARS_MAX + 1);

        assert!(store
            .update_comment(comment.id, &too_long)
            .await
            .unwrap_err()
            .is_validation());
        assert!(store.update_comment(99, "x").await.unwrap_err().is_not_found());
        assert_eq!(store.get_comment(comment.id).await.unwrap().content, "before");
    }

    #[tokio::test]
    async fn test_cross_post_parent_accepted() {
        let store = MemoryStore::new();
        let first = store.create_post("1", "1", "a").await.unwrap();
        let second = store.create_post("2", "2", "a").await.unwrap();
        let parent = store.create_comment(first.id, "a", "p", None).await.unwrap();

        let child = store
            .create_comment(second.id, "a", "c", Some(parent.id))
            .await
            .unwrap();

        assert_eq!(child.post_id, second.id);
        // The parent lives on another post, so the child is not in either forest
        assert!(store.get_comments(second.id, 0, 10).await.unwrap().is_empty());
        let first_forest = store.get_comments(first.id, 0, 10).await.unwrap();
        assert!(first_forest[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_ids_distinct() {
        let store = Arc::new(MemoryStore::new());
        let post_id = store.create_post("t", "c", "a").await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let comment = store
                    .create_comment(post_id, "a", &format!("c{i}"), None)
                    .await
                    .unwrap();
                let extra = store.create_post(&format!("p{i}"), "c", "a").await.unwrap();
                (comment.id, extra.id)
            }));
        }

        let mut comment_ids = HashSet::new();
        let mut post_ids = HashSet::from([post_id]);
        for handle in handles {
            let (comment_id, post_id) = handle.await.unwrap();
            assert!(comment_ids.insert(comment_id), "duplicate comment id {comment_id}");
            assert!(post_ids.insert(post_id), "duplicate post id {post_id}");
        }

        assert_eq!(store.comment_count().await, 32);
        assert_eq!(store.post_count().await, 33);
    }
}
