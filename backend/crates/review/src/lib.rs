//! Review (Product Reviews & Ratings) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Review entity, rating and product value objects, summary, repository trait
//! - `application/` - Use cases (submit, edit, delete, helpful votes, queries)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! One review per account and product, enforced by a unique index.
//! Helpful votes are an atomic increment without per-account dedup.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::ReviewConfig;
pub use error::{ReviewError, ReviewResult};
pub use infra::postgres::PgReviewRepository;
pub use presentation::router::{reviews_router, reviews_router_generic};
