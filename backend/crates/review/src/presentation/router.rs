//! Review Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ReviewConfig;
use crate::domain::repository::ReviewRepository;
use crate::infra::postgres::PgReviewRepository;
use crate::presentation::handlers::{self, ReviewAppState};

/// Review routes (`/api/reviews/...`) backed by PostgreSQL
pub fn reviews_router(repo: PgReviewRepository, config: ReviewConfig) -> Router {
    reviews_router_generic(repo, config)
}

/// Review routes for any repository implementation
pub fn reviews_router_generic<R>(repo: R, config: ReviewConfig) -> Router
where
    R: ReviewRepository + Clone + Send + Sync + 'static,
{
    let state = ReviewAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", post(handlers::create_review::<R>))
        .route("/my-reviews", get(handlers::my_reviews::<R>))
        .route("/can-review/{product_id}", get(handlers::can_review::<R>))
        .route("/product/{product_id}", get(handlers::product_reviews::<R>))
        .route(
            "/product/{product_id}/summary",
            get(handlers::product_summary::<R>),
        )
        .route(
            "/product/{product_id}/helpful",
            get(handlers::most_helpful::<R>),
        )
        .route(
            "/product/{product_id}/verified",
            get(handlers::verified_reviews::<R>),
        )
        .route(
            "/product/{product_id}/search",
            get(handlers::search_reviews::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_review::<R>)
                .put(handlers::update_review::<R>)
                .delete(handlers::delete_review::<R>),
        )
        .route("/{id}/helpful", post(handlers::mark_helpful::<R>))
        .with_state(state)
}
