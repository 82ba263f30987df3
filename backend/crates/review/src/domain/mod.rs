//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod summary;
pub mod value_object;

pub use entity::review::{Author, Review, ReviewContent, ReviewWithAuthor};
pub use repository::{ReviewOrder, ReviewQuery, ReviewRepository};
pub use summary::RatingSummary;
