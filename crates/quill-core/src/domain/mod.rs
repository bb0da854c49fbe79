//! Domain entities - the core business objects.

mod comment;
mod engagement;
mod post;
mod tag;
mod user;

pub use comment::Comment;
pub use engagement::{Bookmark, Like};
pub use post::{Post, PostChanges};
pub use tag::Tag;
pub use user::User;
