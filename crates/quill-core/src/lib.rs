//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! content derivation (read time, excerpts), tag normalization, the post
//! draft/published lifecycle, and the port traits infrastructure implements.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
