//! HTTP Handlers

use axum::extract::{Path, Query, State};
use kernel::access::Caller;
use kernel::response::{ApiJson, ApiResponse, Empty};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::ReviewConfig;
use crate::application::{
    ManageReviewUseCase, ReviewQueryUseCase, SubmitReviewInput, SubmitReviewUseCase,
};
use crate::domain::repository::ReviewRepository;
use crate::domain::value_object::ReviewId;
use crate::error::ReviewResult;
use crate::presentation::dto::{
    CanReviewResponse, CreateReviewRequest, HelpfulResponse, RatingQuery, ReviewEnvelope,
    ReviewsEnvelope, SearchQuery, SummaryEnvelope, UpdateReviewRequest,
};

/// Shared state for review handlers
#[derive(Clone)]
pub struct ReviewAppState<R>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ReviewConfig>,
}

impl<R> ReviewAppState<R>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    fn queries(&self) -> ReviewQueryUseCase<R> {
        ReviewQueryUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Author
// ============================================================================

/// POST /api/reviews
pub async fn create_review<R>(
    State(state): State<ReviewAppState<R>>,
    caller: Caller,
    ApiJson(req): ApiJson<CreateReviewRequest>,
) -> ReviewResult<ApiResponse<ReviewEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let (product_id, content) = req.into_parts();
    let created = SubmitReviewUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &caller,
            SubmitReviewInput {
                product_id,
                content,
            },
        )
        .await?;

    Ok(ApiResponse::created(
        "Review created successfully",
        ReviewEnvelope::from(&created),
    ))
}

/// PUT /api/reviews/{id}
pub async fn update_review<R>(
    State(state): State<ReviewAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateReviewRequest>,
) -> ReviewResult<ApiResponse<ReviewEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let updated = ManageReviewUseCase::new(state.repo.clone(), state.config.clone())
        .update(&caller, &ReviewId::from_uuid(id), req.into())
        .await?;

    Ok(ApiResponse::ok(
        "Review updated successfully",
        ReviewEnvelope::from(&updated),
    ))
}

/// DELETE /api/reviews/{id}
pub async fn delete_review<R>(
    State(state): State<ReviewAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> ReviewResult<ApiResponse<Empty>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    ManageReviewUseCase::new(state.repo.clone(), state.config.clone())
        .delete(&caller, &ReviewId::from_uuid(id))
        .await?;

    Ok(ApiResponse::message("Review deleted successfully"))
}

/// GET /api/reviews/my-reviews
pub async fn my_reviews<R>(
    State(state): State<ReviewAppState<R>>,
    caller: Caller,
) -> ReviewResult<ApiResponse<ReviewsEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let reviews = state.queries().mine(&caller).await?;
    Ok(ApiResponse::ok("Your reviews", reviews.into()))
}

/// GET /api/reviews/can-review/{productId}
pub async fn can_review<R>(
    State(state): State<ReviewAppState<R>>,
    caller: Caller,
    Path(product_id): Path<String>,
) -> ReviewResult<ApiResponse<CanReviewResponse>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let can_review = state.queries().can_review(&caller, &product_id).await?;
    Ok(ApiResponse::ok(
        "Review eligibility",
        CanReviewResponse { can_review },
    ))
}

// ============================================================================
// Public
// ============================================================================

/// GET /api/reviews/{id}
pub async fn get_review<R>(
    State(state): State<ReviewAppState<R>>,
    Path(id): Path<Uuid>,
) -> ReviewResult<ApiResponse<ReviewEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let review = state.queries().get(&ReviewId::from_uuid(id)).await?;
    Ok(ApiResponse::ok(
        "Review retrieved",
        ReviewEnvelope::from(&review),
    ))
}

/// POST /api/reviews/{id}/helpful
pub async fn mark_helpful<R>(
    State(state): State<ReviewAppState<R>>,
    Path(id): Path<Uuid>,
) -> ReviewResult<ApiResponse<HelpfulResponse>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let helpful_count = state
        .queries()
        .mark_helpful(&ReviewId::from_uuid(id))
        .await?;

    Ok(ApiResponse::ok(
        "Marked as helpful",
        HelpfulResponse { helpful_count },
    ))
}

/// GET /api/reviews/product/{productId}?rating=
pub async fn product_reviews<R>(
    State(state): State<ReviewAppState<R>>,
    Path(product_id): Path<String>,
    Query(query): Query<RatingQuery>,
) -> ReviewResult<ApiResponse<ReviewsEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let reviews = state
        .queries()
        .for_product(&product_id, query.rating)
        .await?;
    Ok(ApiResponse::ok("Product reviews", reviews.into()))
}

/// GET /api/reviews/product/{productId}/summary
pub async fn product_summary<R>(
    State(state): State<ReviewAppState<R>>,
    Path(product_id): Path<String>,
) -> ReviewResult<ApiResponse<SummaryEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let summary = state.queries().summary(&product_id).await?;
    Ok(ApiResponse::ok("Rating summary", summary.into()))
}

/// GET /api/reviews/product/{productId}/helpful
pub async fn most_helpful<R>(
    State(state): State<ReviewAppState<R>>,
    Path(product_id): Path<String>,
) -> ReviewResult<ApiResponse<ReviewsEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let reviews = state.queries().most_helpful(&product_id).await?;
    Ok(ApiResponse::ok("Most helpful reviews", reviews.into()))
}

/// GET /api/reviews/product/{productId}/verified
pub async fn verified_reviews<R>(
    State(state): State<ReviewAppState<R>>,
    Path(product_id): Path<String>,
) -> ReviewResult<ApiResponse<ReviewsEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let reviews = state.queries().verified(&product_id).await?;
    Ok(ApiResponse::ok("Verified reviews", reviews.into()))
}

/// GET /api/reviews/product/{productId}/search?q=
pub async fn search_reviews<R>(
    State(state): State<ReviewAppState<R>>,
    Path(product_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> ReviewResult<ApiResponse<ReviewsEnvelope>>
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let reviews = state.queries().search(&product_id, &query.q).await?;
    Ok(ApiResponse::ok("Search results", reviews.into()))
}
