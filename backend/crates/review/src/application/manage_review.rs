//! Edit / Delete Review Use Case
//!
//! Only the author may edit. The author or an admin may delete.

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};

use crate::application::config::ReviewConfig;
use crate::application::content::ReviewContentInput;
use crate::domain::entity::review::ReviewWithAuthor;
use crate::domain::repository::ReviewRepository;
use crate::domain::value_object::ReviewId;
use crate::error::{ReviewError, ReviewResult};

pub struct ManageReviewUseCase<R>
where
    R: ReviewRepository,
{
    review_repo: Arc<R>,
    config: Arc<ReviewConfig>,
}

impl<R> ManageReviewUseCase<R>
where
    R: ReviewRepository,
{
    pub fn new(review_repo: Arc<R>, config: Arc<ReviewConfig>) -> Self {
        Self {
            review_repo,
            config,
        }
    }

    pub async fn update(
        &self,
        caller: &Caller,
        review_id: &ReviewId,
        content: ReviewContentInput,
    ) -> ReviewResult<ReviewWithAuthor> {
        let ReviewWithAuthor { mut review, .. } = self.load(review_id).await?;
        authorize(caller, Some(&review.account_id), Action::Edit)?;

        review.revise(content.validate(&self.config)?);
        let updated = self.review_repo.update(&review).await?;

        tracing::info!(
            review_id = %review.review_id,
            rating = %review.rating,
            "Review updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, caller: &Caller, review_id: &ReviewId) -> ReviewResult<()> {
        let ReviewWithAuthor { review, .. } = self.load(review_id).await?;
        authorize(caller, Some(&review.account_id), Action::Delete)?;

        self.review_repo.delete(review_id).await?;

        tracing::info!(
            review_id = %review_id,
            deleted_by = %caller.account_id,
            by_admin = !caller.owns(&review.account_id),
            "Review deleted"
        );
        Ok(())
    }

    async fn load(&self, review_id: &ReviewId) -> ReviewResult<ReviewWithAuthor> {
        self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or(ReviewError::NotFound)
    }
}
