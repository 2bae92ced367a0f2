//! HTTP API
//!
//! Axum routes mapping one-to-one onto the `PostStore` operations. The
//! handlers only move scalars in and entities out; every rule lives in
//! `board-core`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use board_core::{
    Comment, CommentId, Post, PostId, PostStore, StoreError, COMMENTS_PAGE_LIMIT_DEFAULT,
};

use crate::APP_VERSION;

// =============================================================================
// State and Router
// =============================================================================

/// Shared handler state: the backend picked at startup.
#[derive(Clone)]
pub struct AppState {
    /// Selected store
    pub store: Arc<dyn PostStore>,
}

/// Build the router over `store`.
pub fn router(store: Arc<dyn PostStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post).put(update_post))
        .route("/posts/:id/disable-comments", post(disable_comments))
        .route("/posts/:id/comments", get(get_comments).post(create_comment))
        .route("/comments/:id", get(get_comment).put(update_comment))
        .with_state(AppState { store })
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Health check body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

/// `offset`/`limit` query string for comment pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Top-level comments to skip (default 0)
    pub offset: Option<usize>,
    /// Top-level comments to return (default `COMMENTS_PAGE_LIMIT_DEFAULT`)
    pub limit: Option<usize>,
}

impl PageParams {
    fn window(&self) -> (usize, usize) {
        (
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(COMMENTS_PAGE_LIMIT_DEFAULT),
        )
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Author name
    pub author: String,
}

/// Body of `PUT /posts/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    /// New title
    pub title: String,
    /// New body text
    pub content: String,
}

/// Body of `POST /posts/:id/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Author name
    pub author: String,
    /// Body text
    pub content: String,
    /// Comment being replied to
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

/// Body of `PUT /comments/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    /// New body text
    pub content: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Store failure rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %self.0, "Storage failure");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Handlers
// =============================================================================

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: APP_VERSION.to_string(),
    })
}

/// `GET /posts`
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.store.list_posts().await?))
}

/// `POST /posts`
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = state
        .store
        .create_post(&request.title, &request.content, &request.author)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /posts/:id?offset=&limit=`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Post>> {
    let (offset, limit) = page.window();
    Ok(Json(state.store.get_post(id, offset, limit).await?))
}

/// `PUT /posts/:id`
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(request): Json<UpdatePostRequest>,
) -> ApiResult<Json<Post>> {
    let post = state
        .store
        .update_post(id, &request.title, &request.content)
        .await?;
    Ok(Json(post))
}

/// `POST /posts/:id/disable-comments`
pub async fn disable_comments(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<StatusCode> {
    state.store.disable_comments(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /posts/:id/comments?offset=&limit=`
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Vec<Comment>>> {
    let (offset, limit) = page.window();
    Ok(Json(state.store.get_comments(id, offset, limit).await?))
}

/// `POST /posts/:id/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .store
        .create_comment(id, &request.author, &request.content, request.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /comments/:id`
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> ApiResult<Json<Comment>> {
    Ok(Json(state.store.get_comment(id).await?))
}

/// `PUT /comments/:id`
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
    Json(request): Json<UpdateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    Ok(Json(state.store.update_comment(id, &request.content).await?))
}
