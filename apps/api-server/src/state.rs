//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use quill_core::ports::{
    BookmarkRepository, CommentRepository, LikeRepository, PostRepository, TagRepository,
    UserRepository,
};
use quill_infra::{
    PostgresBookmarkRepository, PostgresCommentRepository, PostgresLikeRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state over a database connection.
    pub fn new(db: DbConn) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db.clone())),
            bookmarks: Arc::new(PostgresBookmarkRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        }
    }
}
