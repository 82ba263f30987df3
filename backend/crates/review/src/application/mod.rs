//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod content;
pub mod manage_review;
pub mod query;
pub mod submit_review;

pub use config::ReviewConfig;
pub use content::ReviewContentInput;
pub use manage_review::ManageReviewUseCase;
pub use query::ReviewQueryUseCase;
pub use submit_review::{SubmitReviewInput, SubmitReviewUseCase};
