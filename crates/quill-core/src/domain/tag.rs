use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a unique lowercase label shared across posts.
///
/// Tags are created on first use and never deleted; orphans persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    /// Create a tag from an already-normalized name.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
