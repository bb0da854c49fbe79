use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment entity - append-only remark on a post, deletable by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. Content must be non-empty after trimming.
    pub fn new(post_id: Uuid, author_id: Uuid, content: String) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Comment content must not be empty".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            content,
            post_id,
            author_id,
            created_at: now,
            updated_at: now,
        })
    }
}
