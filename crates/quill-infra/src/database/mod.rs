//! Database connection management and repository implementations.

mod connections;
pub mod entity;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresBookmarkRepository, PostgresCommentRepository, PostgresLikeRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
