//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, JWT + Argon2 authentication, and
//! verification-code delivery.

pub mod auth;
pub mod database;
pub mod verification;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresBookmarkRepository, PostgresCommentRepository, PostgresLikeRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};
pub use verification::LogVerificationSender;
