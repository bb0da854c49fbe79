//! Post handlers - creation, listing, lifecycle, deletion.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::content;
use quill_core::domain::{Post, PostChanges};
use quill_core::ports::{Page, PostFilter};
use quill_shared::dto::{
    AuthorInfo, CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    12
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    pub is_draft: Option<bool>,
    pub author_id: Option<Uuid>,
}

impl ListQuery {
    fn page_window(&self) -> AppResult<Page> {
        if self.page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err(AppError::Validation(
                "page_size must be between 1 and 100".to_string(),
            ));
        }
        Ok(Page {
            page: self.page,
            page_size: self.page_size,
        })
    }
}

/// 404 unless the post exists. Engagement and comment handlers gate on this
/// before touching their own aggregates.
pub(crate) async fn ensure_post_exists(state: &AppState, post_id: Uuid) -> AppResult<()> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(())
}

/// Author summary for embedding in responses.
pub(crate) async fn author_info(state: &AppState, author_id: Uuid) -> AppResult<AuthorInfo> {
    let author = state
        .users
        .find_by_id(author_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("author {} missing", author_id)))?;

    Ok(AuthorInfo {
        id: author.id,
        name: author.name,
        avatar: author.avatar,
    })
}

/// Decorate a post with author, aggregate counts, and tag names.
async fn post_response(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let author = author_info(state, post.author_id).await?;
    let likes_count = state.likes.count(post.id).await?;
    let comments_count = state.comments.count_for_post(post.id).await?;
    let tags = state.posts.tag_names(post.id).await?;

    Ok(PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        excerpt: post.excerpt,
        cover_image: post.cover_image,
        published_at: post.published_at,
        read_time: post.read_time,
        is_draft: post.is_draft,
        seo_title: post.seo_title,
        seo_description: post.seo_description,
        author,
        created_at: post.created_at,
        updated_at: post.updated_at,
        likes_count,
        comments_count,
        tags,
    })
}

async fn paged_response(
    state: &AppState,
    posts: Vec<Post>,
    total: u64,
    page: Page,
) -> AppResult<PostListResponse> {
    let mut decorated = Vec::with_capacity(posts.len());
    for post in posts {
        decorated.push(post_response(state, post).await?);
    }

    Ok(PostListResponse {
        posts: decorated,
        total,
        page: page.page,
        page_size: page.page_size,
        total_pages: total.div_ceil(page.page_size),
    })
}

/// Resolve and link the given raw tag list to a post, replacing any
/// previous associations.
async fn link_tags(state: &AppState, post_id: Uuid, raw_tags: &[String]) -> AppResult<()> {
    let names = content::normalize_tags(raw_tags);
    let tags = state.tags.find_or_create(&names).await?;
    let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    state.posts.replace_tags(post_id, &tag_ids).await?;
    Ok(())
}

/// POST /api/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let post = Post::new(
        identity.user_id,
        req.title,
        req.content,
        req.cover_image,
        req.seo_title,
        req.seo_description,
        req.is_draft,
    );
    let post = state.posts.save(post).await?;

    if !req.tags.is_empty() {
        link_tags(&state, post.id, &req.tags).await?;
    }

    tracing::debug!(post_id = %post.id, author = %identity.user_id, "Post created");

    let response = post_response(&state, post).await?;
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/posts - public feed, published posts by default
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page_window()?;
    let filter = PostFilter {
        draft: query.is_draft,
        author_id: query.author_id,
    };

    let (posts, total) = state.posts.list(filter, page).await?;
    let response = paged_response(&state, posts, total, page).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/posts/my-posts - the caller's posts, drafts included
pub async fn my_posts(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page_window()?;

    let (posts, total) = state.posts.list_by_author(identity.user_id, page).await?;
    let response = paged_response(&state, posts, total, page).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let response = post_response(&state, post).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/posts/{post_id} - owner only
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to update this post".to_string(),
        ));
    }

    post.apply(PostChanges {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        cover_image: req.cover_image,
        seo_title: req.seo_title,
        seo_description: req.seo_description,
        is_draft: req.is_draft,
    });

    let post = state.posts.save(post).await?;

    // Tags present means full replace, including replace-with-nothing
    if let Some(tags) = req.tags {
        link_tags(&state, post.id, &tags).await?;
    }

    let response = post_response(&state, post).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/posts/{post_id} - owner only, cascades to dependents
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this post".to_string(),
        ));
    }

    state.posts.delete(post_id).await?;

    tracing::debug!(post_id = %post_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
