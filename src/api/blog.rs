//! Blog endpoints: public reading, reactions and comments, plus the admin
//! post CRUD and the AI draft generator.

use axum::{
    extract::{Path, State},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::ai::{BlogDraft, GenerateDraftRequest};
use crate::errors::AppError;
use crate::models::{
    BlogComment, BlogPost, BlogPostSummary, CreateCommentRequest, CreatePostRequest,
    ReactionOutcome, ReactionRequest, UpdatePostRequest,
};
use crate::AppState;

lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

// ==================== PUBLIC SURFACE ====================

/// GET /api/blog - Published post summaries, newest first.
pub async fn list_published_posts(
    State(state): State<AppState>,
) -> ApiResult<Vec<BlogPostSummary>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_published_posts().await {
        Ok(posts) => success(
            posts.into_iter().map(BlogPostSummary::from).collect(),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/blog/:slug - A published post by its exact slug.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<BlogPost> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_published_post_by_slug(&slug).await {
        Ok(Some(post)) => success(post, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Post {} not found", slug)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// View counter payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCount {
    pub views: i64,
}

/// POST /api/blog/:slug/views - Atomically bump the view counter.
pub async fn record_view(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<ViewCount> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let post = match state.repo.get_published_post_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Post {} not found", slug)),
                revision_id,
            )
        }
        Err(e) => return error(e, revision_id),
    };

    match state.repo.increment_views(&post.id).await {
        Ok(views) => success(ViewCount { views }, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/blog/:slug/reactions - Cast a like or dislike.
///
/// One reaction per reader per post; a repeat attempt comes back with
/// `accepted = false` and unchanged counters.
pub async fn react_to_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<ReactionRequest>,
) -> ApiResult<ReactionOutcome> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.reader_key.trim().is_empty() {
        return error(
            AppError::Validation("Reader key is required".to_string()),
            revision_id,
        );
    }

    let post = match state.repo.get_published_post_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Post {} not found", slug)),
                revision_id,
            )
        }
        Err(e) => return error(e, revision_id),
    };

    match state
        .repo
        .add_reaction(&post.id, request.reader_key.trim(), request.kind)
        .await
    {
        Ok(outcome) => success(outcome, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/blog/:slug/comments - Comments of a published post, oldest first.
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Vec<BlogComment>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let post = match state.repo.get_published_post_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Post {} not found", slug)),
                revision_id,
            )
        }
        Err(e) => return error(e, revision_id),
    };

    match state.repo.list_comments(&post.id).await {
        Ok(comments) => success(comments, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/blog/:slug/comments - Post a comment or a reply.
///
/// Anonymous commenting is allowed; an author name is required either way.
pub async fn create_post_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<BlogComment> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.author_name.trim().is_empty() {
        return error(
            AppError::Validation("Author name is required".to_string()),
            revision_id,
        );
    }
    if request.content.trim().is_empty() {
        return error(
            AppError::Validation("Comment content is required".to_string()),
            revision_id,
        );
    }

    let post = match state.repo.get_published_post_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Post {} not found", slug)),
                revision_id,
            )
        }
        Err(e) => return error(e, revision_id),
    };

    match state.repo.create_comment(&post.id, &request).await {
        Ok(comment) => success(comment, revision_id),
        Err(e) => error(e, revision_id),
    }
}

// ==================== ADMIN SURFACE ====================

/// GET /api/admin/posts - All posts, drafts included.
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_posts().await {
        Ok(posts) => success(posts, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/posts/:id - A single post, draft or published.
pub async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<BlogPost> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_post(&id).await {
        Ok(Some(post)) => success(post, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Post {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/admin/posts - Create a post.
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<BlogPost> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }
    if !is_valid_slug(&request.slug) {
        return error(
            AppError::Validation(format!("Invalid slug: {}", request.slug)),
            revision_id,
        );
    }
    match state.repo.slug_exists(&request.slug, None).await {
        Ok(true) => {
            return error(
                AppError::Validation(format!("Slug {} is already taken", request.slug)),
                revision_id,
            )
        }
        Ok(false) => {}
        Err(e) => return error(e, revision_id),
    }

    match state.repo.create_post(&request).await {
        Ok(post) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(post, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/admin/posts/:id - Update a post.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> ApiResult<BlogPost> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Some(slug) = &request.slug {
        if !is_valid_slug(slug) {
            return error(
                AppError::Validation(format!("Invalid slug: {}", slug)),
                revision_id,
            );
        }
        match state.repo.slug_exists(slug, Some(&id)).await {
            Ok(true) => {
                return error(
                    AppError::Validation(format!("Slug {} is already taken", slug)),
                    revision_id,
                )
            }
            Ok(false) => {}
            Err(e) => return error(e, revision_id),
        }
    }

    match state.repo.update_post(&id, &request).await {
        Ok(post) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(post, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/admin/posts/:id - Delete a post and its comments/reactions.
pub async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_post(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/admin/comments/:id - Remove a comment and its replies.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_comment(&id).await {
        Ok(()) => success((), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/admin/posts/generate - Generate a blog draft with the
/// generative-text collaborator. Nothing is persisted; the admin reviews
/// the draft before saving it as a post.
pub async fn generate_draft(
    State(state): State<AppState>,
    Json(request): Json<GenerateDraftRequest>,
) -> ApiResult<BlogDraft> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.topic.trim().is_empty() {
        return error(
            AppError::Validation("Topic is required".to_string()),
            revision_id,
        );
    }

    match state
        .generator
        .generate(request.topic.trim(), request.category.as_deref())
        .await
    {
        Ok(draft) => success(draft, revision_id),
        Err(e) => error(e, revision_id),
    }
}
