//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::review::{Review, ReviewWithAuthor};
use crate::domain::summary::RatingSummary;
use crate::domain::value_object::{AccountId, ProductId, Rating, ReviewId};
use crate::error::ReviewResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewOrder {
    #[default]
    Newest,
    /// Highest helpful count first, then newest
    MostHelpful,
}

/// Filters for listing one product's reviews
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    pub rating: Option<Rating>,
    pub verified_only: bool,
    /// Case-insensitive substring of title or comment
    pub term: Option<String>,
    pub order: ReviewOrder,
}

#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Insert; a second review of the same product by the same account
    /// yields `ReviewError::AlreadyReviewed`
    async fn create(&self, review: &Review) -> ReviewResult<ReviewWithAuthor>;

    /// Persist rating, text and images
    async fn update(&self, review: &Review) -> ReviewResult<ReviewWithAuthor>;

    async fn delete(&self, review_id: &ReviewId) -> ReviewResult<()>;

    async fn find_by_id(&self, review_id: &ReviewId) -> ReviewResult<Option<ReviewWithAuthor>>;

    async fn exists_for(&self, account_id: &AccountId, product_id: &ProductId)
    -> ReviewResult<bool>;

    async fn list_for_product(
        &self,
        product_id: &ProductId,
        query: &ReviewQuery,
    ) -> ReviewResult<Vec<ReviewWithAuthor>>;

    /// Reviews written by one account, newest first
    async fn list_by_account(&self, account_id: &AccountId) -> ReviewResult<Vec<ReviewWithAuthor>>;

    /// Atomically add one helpful vote; `None` when the review does not exist
    async fn increment_helpful(&self, review_id: &ReviewId) -> ReviewResult<Option<i32>>;

    async fn rating_summary(&self, product_id: &ProductId) -> ReviewResult<RatingSummary>;
}
