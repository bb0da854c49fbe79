//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod verification;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    BaseRepository, BookmarkRepository, CommentRepository, LikeRepository, Page, PostFilter,
    PostRepository, TagRepository, UserRepository,
};
pub use verification::{VerificationError, VerificationSender};
