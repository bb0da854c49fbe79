use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content;

/// Post entity - a blog post with derived read time and excerpt.
///
/// Lifecycle invariant: `published_at` is set the first time the post leaves
/// draft state and is never cleared afterwards, even if the draft flag is
/// toggled back on. A non-null `published_at` means "this post has been
/// publicly visible at least once".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub read_time: i32,
    pub is_draft: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a post. `None` means "leave the field untouched".
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_draft: Option<bool>,
}

impl Post {
    /// Create a new post with derived read time and excerpt.
    ///
    /// `published_at` is set to now iff the post is created already published.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: Uuid,
        title: String,
        content: String,
        cover_image: Option<String>,
        seo_title: Option<String>,
        seo_description: Option<String>,
        is_draft: bool,
    ) -> Self {
        let now = Utc::now();
        let read_time = content::read_time(&content);
        let excerpt = content::excerpt(&content, seo_description.as_deref());
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            excerpt: Some(excerpt),
            cover_image,
            published_at: if is_draft { None } else { Some(now) },
            read_time,
            is_draft,
            seo_title,
            seo_description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update.
    ///
    /// Content changes re-derive read time, and re-derive the excerpt unless
    /// an explicit excerpt is part of the same update. A draft-to-published
    /// transition stamps `published_at` only when it is still unset; every
    /// other draft-flag change leaves it alone.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }

        let content_changed = changes.content.is_some();
        if let Some(content) = changes.content {
            self.read_time = content::read_time(&content);
            self.content = content;
        }

        if let Some(excerpt) = changes.excerpt {
            self.excerpt = Some(excerpt);
        } else if content_changed {
            self.excerpt = Some(content::excerpt(
                &self.content,
                changes.seo_description.as_deref(),
            ));
        }

        if let Some(cover_image) = changes.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(seo_title) = changes.seo_title {
            self.seo_title = Some(seo_title);
        }
        if let Some(seo_description) = changes.seo_description {
            self.seo_description = Some(seo_description);
        }

        if let Some(is_draft) = changes.is_draft {
            self.is_draft = is_draft;
            if !is_draft && self.published_at.is_none() {
                self.published_at = Some(Utc::now());
            }
        }

        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "Title".to_string(),
            "<p>hello world</p>".to_string(),
            None,
            None,
            None,
            true,
        )
    }

    #[test]
    fn test_new_published_post_has_published_at() {
        let post = Post::new(
            Uuid::new_v4(),
            "Title".to_string(),
            "<p>hello world</p>".to_string(),
            None,
            None,
            None,
            false,
        );
        assert!(post.published_at.is_some());
        assert!(!post.is_draft);
        assert_eq!(post.read_time, 1);
        assert_eq!(post.excerpt.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_new_draft_has_no_published_at() {
        let post = draft_post();
        assert!(post.published_at.is_none());
        assert!(post.is_draft);
    }

    #[test]
    fn test_publish_sets_timestamp_once() {
        let mut post = draft_post();

        post.apply(PostChanges {
            is_draft: Some(false),
            ..Default::default()
        });
        let first_published = post.published_at;
        assert!(first_published.is_some());

        // Back to draft: timestamp survives
        post.apply(PostChanges {
            is_draft: Some(true),
            ..Default::default()
        });
        assert!(post.is_draft);
        assert_eq!(post.published_at, first_published);

        // Re-publish: original timestamp is kept, not refreshed
        post.apply(PostChanges {
            is_draft: Some(false),
            ..Default::default()
        });
        assert_eq!(post.published_at, first_published);
    }

    #[test]
    fn test_content_change_rederives_read_time_and_excerpt() {
        let mut post = draft_post();
        let long = "word ".repeat(450);

        post.apply(PostChanges {
            content: Some(long),
            ..Default::default()
        });

        assert_eq!(post.read_time, 2);
        let excerpt = post.excerpt.as_deref().unwrap();
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn test_explicit_excerpt_suppresses_rederivation() {
        let mut post = draft_post();

        post.apply(PostChanges {
            content: Some("brand new content".to_string()),
            excerpt: Some("my summary".to_string()),
            ..Default::default()
        });

        assert_eq!(post.excerpt.as_deref(), Some("my summary"));
        assert_eq!(post.content, "brand new content");
    }

    #[test]
    fn test_absent_fields_are_untouched() {
        let mut post = draft_post();
        post.cover_image = Some("cover.png".to_string());
        let before = post.clone();

        post.apply(PostChanges::default());

        assert_eq!(post.title, before.title);
        assert_eq!(post.content, before.content);
        assert_eq!(post.excerpt, before.excerpt);
        assert_eq!(post.cover_image, before.cover_image);
        assert_eq!(post.is_draft, before.is_draft);
        assert_eq!(post.published_at, before.published_at);
    }
}
