//! Comment handlers - the append-only remark ledger per post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::handlers::posts::{author_info, ensure_post_exists};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn comment_response(state: &AppState, comment: Comment) -> AppResult<CommentResponse> {
    let author = author_info(state, comment.author_id).await?;

    Ok(CommentResponse {
        id: comment.id,
        content: comment.content,
        post_id: comment.post_id,
        author_id: comment.author_id,
        author,
        created_at: comment.created_at,
    })
}

/// POST /api/comments
pub async fn create_comment(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    ensure_post_exists(&state, req.post_id).await?;

    let comment = Comment::new(req.post_id, identity.user_id, req.content)?;
    let comment = state.comments.save(comment).await?;

    let response = comment_response(&state, comment).await?;
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/comments/post/{post_id} - newest first
pub async fn list_for_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    ensure_post_exists(&state, post_id).await?;

    let comments = state.comments.list_for_post(post_id).await?;

    let mut response = Vec::with_capacity(comments.len());
    for comment in comments {
        response.push(comment_response(&state, comment).await?);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/comments/{comment_id} - owner only
pub async fn delete_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comment.author_id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this comment".to_string(),
        ));
    }

    state.comments.delete(comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
