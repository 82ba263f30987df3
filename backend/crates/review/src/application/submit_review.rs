//! Submit Review Use Case

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};

use crate::application::config::ReviewConfig;
use crate::application::content::ReviewContentInput;
use crate::domain::entity::review::{Review, ReviewWithAuthor};
use crate::domain::repository::ReviewRepository;
use crate::domain::value_object::ProductId;
use crate::error::{ReviewError, ReviewResult};

pub struct SubmitReviewInput {
    pub product_id: String,
    pub content: ReviewContentInput,
}

pub struct SubmitReviewUseCase<R>
where
    R: ReviewRepository,
{
    review_repo: Arc<R>,
    config: Arc<ReviewConfig>,
}

impl<R> SubmitReviewUseCase<R>
where
    R: ReviewRepository,
{
    pub fn new(review_repo: Arc<R>, config: Arc<ReviewConfig>) -> Self {
        Self {
            review_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &Caller,
        input: SubmitReviewInput,
    ) -> ReviewResult<ReviewWithAuthor> {
        authorize(caller, None, Action::Create)?;

        let product_id = ProductId::new(&input.product_id)?;
        let content = input.content.validate(&self.config)?;

        if self
            .review_repo
            .exists_for(&caller.account_id, &product_id)
            .await?
        {
            return Err(ReviewError::AlreadyReviewed);
        }

        let review = Review::new(caller.account_id, product_id, content);

        // A concurrent submission for the same product loses on the unique index
        let created = self.review_repo.create(&review).await?;

        tracing::info!(
            review_id = %created.review.review_id,
            account_id = %caller.account_id,
            product_id = %created.review.product_id,
            rating = %created.review.rating,
            "Review submitted"
        );
        Ok(created)
    }
}
