//! Review Queries
//!
//! Public listings, the rating summary, helpful votes, and the
//! caller-specific "my reviews" / "can review" checks.

use std::sync::Arc;

use kernel::access::Caller;

use crate::application::config::ReviewConfig;
use crate::domain::entity::review::ReviewWithAuthor;
use crate::domain::repository::{ReviewOrder, ReviewQuery, ReviewRepository};
use crate::domain::summary::RatingSummary;
use crate::domain::value_object::{ProductId, Rating, ReviewId};
use crate::error::{ReviewError, ReviewResult};

pub struct ReviewQueryUseCase<R>
where
    R: ReviewRepository,
{
    review_repo: Arc<R>,
    config: Arc<ReviewConfig>,
}

impl<R> ReviewQueryUseCase<R>
where
    R: ReviewRepository,
{
    pub fn new(review_repo: Arc<R>, config: Arc<ReviewConfig>) -> Self {
        Self {
            review_repo,
            config,
        }
    }

    pub async fn get(&self, review_id: &ReviewId) -> ReviewResult<ReviewWithAuthor> {
        self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or(ReviewError::NotFound)
    }

    /// Newest first, optionally only one star rating
    pub async fn for_product(
        &self,
        product_id: &str,
        rating: Option<i64>,
    ) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let product_id = ProductId::new(product_id)?;
        let query = ReviewQuery {
            rating: rating.map(Rating::new).transpose()?,
            ..Default::default()
        };
        self.review_repo.list_for_product(&product_id, &query).await
    }

    pub async fn most_helpful(&self, product_id: &str) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let product_id = ProductId::new(product_id)?;
        let query = ReviewQuery {
            order: ReviewOrder::MostHelpful,
            ..Default::default()
        };
        self.review_repo.list_for_product(&product_id, &query).await
    }

    pub async fn verified(&self, product_id: &str) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let product_id = ProductId::new(product_id)?;
        let query = ReviewQuery {
            verified_only: true,
            ..Default::default()
        };
        self.review_repo.list_for_product(&product_id, &query).await
    }

    pub async fn search(
        &self,
        product_id: &str,
        term: &str,
    ) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let product_id = ProductId::new(product_id)?;

        let term = term.trim();
        let max = self.config.search_term_max_length;
        if term.is_empty() || term.chars().count() > max {
            return Err(ReviewError::InvalidInput(format!(
                "Search term must be 1 to {} characters",
                max
            )));
        }

        let query = ReviewQuery {
            term: Some(term.to_string()),
            ..Default::default()
        };
        self.review_repo.list_for_product(&product_id, &query).await
    }

    pub async fn summary(&self, product_id: &str) -> ReviewResult<RatingSummary> {
        let product_id = ProductId::new(product_id)?;
        self.review_repo.rating_summary(&product_id).await
    }

    /// Public; no per-account dedup
    pub async fn mark_helpful(&self, review_id: &ReviewId) -> ReviewResult<i32> {
        let count = self
            .review_repo
            .increment_helpful(review_id)
            .await?
            .ok_or(ReviewError::NotFound)?;

        tracing::debug!(review_id = %review_id, helpful_count = count, "Helpful vote");
        Ok(count)
    }

    pub async fn mine(&self, caller: &Caller) -> ReviewResult<Vec<ReviewWithAuthor>> {
        self.review_repo.list_by_account(&caller.account_id).await
    }

    /// True when the caller has not reviewed the product yet
    pub async fn can_review(&self, caller: &Caller, product_id: &str) -> ReviewResult<bool> {
        let product_id = ProductId::new(product_id)?;
        let exists = self
            .review_repo
            .exists_for(&caller.account_id, &product_id)
            .await?;
        Ok(!exists)
    }
}
