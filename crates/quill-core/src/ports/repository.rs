use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Bookmark, Comment, Like, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Filter for post listings.
///
/// `draft: None` means "published only" - the public feed default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFilter {
    pub draft: Option<bool>,
    pub author_id: Option<Uuid>,
}

/// 1-based pagination window.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: u64,
    pub page_size: u64,
}

impl Page {
    /// Row offset for this window. Saturates instead of overflowing, so an
    /// absurd page number yields an empty page rather than a panic or a
    /// wrapped-around offset.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// List posts matching a filter, ordered `published_at DESC NULLS LAST,
    /// created_at DESC`. Returns the page plus the total matching count,
    /// computed before pagination.
    async fn list(&self, filter: PostFilter, page: Page) -> Result<(Vec<Post>, u64), RepoError>;

    /// List an author's posts (drafts included), newest-created first.
    async fn list_by_author(&self, author_id: Uuid, page: Page)
    -> Result<(Vec<Post>, u64), RepoError>;

    /// Replace the post's tag associations with the given set, atomically.
    async fn replace_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Resolved tag names currently linked to the post.
    async fn tag_names(&self, post_id: Uuid) -> Result<Vec<String>, RepoError>;
}

/// Tag repository - lookup-or-create over normalized names.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Resolve each normalized name to a tag, creating missing ones.
    /// Concurrent creation of the same name must not fail the request.
    async fn find_or_create(&self, names: &[String]) -> Result<Vec<Tag>, RepoError>;
}

/// Like repository - toggle-state membership per (post, user).
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Toggle the like for this pair. Returns the resulting liked-state and
    /// a fresh total count for the post.
    async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<(bool, u64), RepoError>;

    /// Whether this pair currently has a like row.
    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Like>, RepoError>;

    /// Idempotent removal - no error if the like is already absent.
    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError>;

    /// Total likes for a post.
    async fn count(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Bookmark repository - same toggle shape as likes, no aggregate exposed.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Toggle the bookmark for this pair. Returns the resulting state.
    async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError>;

    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Bookmark>, RepoError>;

    /// Idempotent removal.
    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, newest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Total comments on a post.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_based_window_start() {
        assert_eq!(Page { page: 1, page_size: 12 }.offset(), 0);
        assert_eq!(Page { page: 3, page_size: 12 }.offset(), 24);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let page = Page {
            page: u64::MAX,
            page_size: 100,
        };
        assert_eq!(page.offset(), u64::MAX);
    }
}
