//! Engagement handlers - like and bookmark toggles per (post, user).

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::dto::{BookmarkStatus, LikeStatus};

use crate::handlers::posts::ensure_post_exists;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

// ===== Likes =====

/// POST /api/posts/{post_id}/like - toggle
pub async fn toggle_like(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    let (is_liked, likes_count) = state.likes.toggle(post_id, identity.user_id).await?;

    Ok(HttpResponse::Ok().json(LikeStatus {
        is_liked,
        likes_count,
    }))
}

/// GET /api/posts/{post_id}/like-status
pub async fn like_status(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    let is_liked = state.likes.find(post_id, identity.user_id).await?.is_some();
    let likes_count = state.likes.count(post_id).await?;

    Ok(HttpResponse::Ok().json(LikeStatus {
        is_liked,
        likes_count,
    }))
}

/// DELETE /api/posts/{post_id}/like - idempotent removal
pub async fn unlike(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    state.likes.remove(post_id, identity.user_id).await?;
    let likes_count = state.likes.count(post_id).await?;

    Ok(HttpResponse::Ok().json(LikeStatus {
        is_liked: false,
        likes_count,
    }))
}

// ===== Bookmarks =====

/// POST /api/posts/{post_id}/bookmark - toggle
pub async fn toggle_bookmark(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    let is_bookmarked = state.bookmarks.toggle(post_id, identity.user_id).await?;

    Ok(HttpResponse::Ok().json(BookmarkStatus { is_bookmarked }))
}

/// GET /api/posts/{post_id}/bookmark-status
pub async fn bookmark_status(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    let is_bookmarked = state
        .bookmarks
        .find(post_id, identity.user_id)
        .await?
        .is_some();

    Ok(HttpResponse::Ok().json(BookmarkStatus { is_bookmarked }))
}

/// DELETE /api/posts/{post_id}/bookmark - idempotent removal
pub async fn remove_bookmark(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    state.bookmarks.remove(post_id, identity.user_id).await?;

    Ok(HttpResponse::Ok().json(BookmarkStatus {
        is_bookmarked: false,
    }))
}
