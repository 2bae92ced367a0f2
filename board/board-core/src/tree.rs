//! Tree - Comment Forest Assembly
//!
//! TigerStyle: The canonical relation is flat; the forest is a view.
//!
//! # Algorithm
//!
//! ```text
//! flat comments (one post)
//!     │  sort by id, index by id
//!     ▼
//! parent → children links      (orphans dropped)
//!     │
//!     ▼
//! top-level roots ── paginate(offset, limit)
//!     │
//!     ▼
//! page roots with full, unpaginated subtrees
//! ```
//!
//! A comment whose parent is missing from the collection is dropped from
//! the result. That is defined behavior, not an error.

use std::collections::HashMap;

use crate::model::{Comment, CommentId};

/// Slice `[offset, offset + limit)` out of `items`, clamped to its length.
///
/// An offset at or past the end yields an empty page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    if offset >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(offset).take(limit).collect()
}

/// Turn the flat comments of one post into a paginated forest.
///
/// Only the top-level sequence is paginated. Every returned root carries
/// its whole subtree regardless of depth. Roots and children are ordered
/// by ascending id, which is creation order in both backends.
#[must_use]
pub fn assemble_forest(mut comments: Vec<Comment>, offset: usize, limit: usize) -> Vec<Comment> {
    comments.sort_by_key(|c| c.id);

    // Index the flat collection
    let mut by_id: HashMap<CommentId, Comment> = HashMap::with_capacity(comments.len());
    let mut order: Vec<CommentId> = Vec::with_capacity(comments.len());
    for mut comment in comments {
        if by_id.contains_key(&comment.id) {
            tracing::warn!(comment_id = comment.id, "duplicate comment id in collection");
            continue;
        }
        comment.children.clear();
        order.push(comment.id);
        by_id.insert(comment.id, comment);
    }

    // Link children to parents, collect roots
    let mut children_of: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
    let mut roots: Vec<CommentId> = Vec::new();
    for id in &order {
        let comment = &by_id[id];
        if comment.is_top_level() {
            roots.push(*id);
        } else if let Some(parent_id) = comment.parent_id.filter(|p| by_id.contains_key(p)) {
            children_of.entry(parent_id).or_default().push(*id);
        } else {
            tracing::debug!(
                comment_id = id,
                parent_id = ?comment.parent_id,
                "dropping comment with missing parent"
            );
        }
    }

    let page = paginate(roots, offset, limit);

    // Preorder walk of the page's subtrees. Each comment has one parent,
    // so every reachable comment is visited once.
    let mut preorder: Vec<CommentId> = Vec::new();
    let mut stack: Vec<CommentId> = page.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        preorder.push(id);
        if let Some(kids) = children_of.get(&id) {
            stack.extend(kids.iter().rev());
        }
    }

    // Build bottom-up: reverse preorder sees every child before its parent
    let mut built: HashMap<CommentId, Comment> = HashMap::with_capacity(preorder.len());
    for id in preorder.iter().rev() {
        let Some(mut comment) = by_id.remove(id) else {
            continue;
        };
        if let Some(kids) = children_of.get(id) {
            comment.children = kids.iter().filter_map(|kid| built.remove(kid)).collect();
        }
        built.insert(*id, comment);
    }

    let forest: Vec<Comment> = page.into_iter().filter_map(|id| built.remove(&id)).collect();

    // Postcondition
    assert!(
        forest.len() <= limit,
        "forest size {} exceeds limit {}",
        forest.len(),
        limit
    );

    forest
}

// =============================================================================
// Tests
// =============================================================================
