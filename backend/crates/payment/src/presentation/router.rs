//! Payment Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::PaymentConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::PaymentRepository;
use crate::infra::paypal::PayPalClient;
use crate::infra::postgres::PgPaymentRepository;
use crate::infra::stripe::StripeClient;
use crate::presentation::handlers::{self, PaymentAppState};

/// Payment routes (`/api/payments/...`) backed by PostgreSQL and the live providers
pub fn payments_router(
    repo: PgPaymentRepository,
    stripe: StripeClient,
    paypal: PayPalClient,
    config: PaymentConfig,
) -> Router {
    payments_router_generic(repo, stripe, paypal, config)
}

/// Payment routes for any repository and gateway implementations
pub fn payments_router_generic<R, S, P>(repo: R, stripe: S, paypal: P, config: PaymentConfig) -> Router
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let state = PaymentAppState {
        repo: Arc::new(repo),
        stripe: Arc::new(stripe),
        paypal: Arc::new(paypal),
        config: Arc::new(config),
    };

    Router::new()
        .route("/stripe/create", post(handlers::create_stripe::<R, S, P>))
        .route("/stripe/confirm", post(handlers::confirm_stripe::<R, S, P>))
        .route("/paypal/create", post(handlers::create_paypal::<R, S, P>))
        .route("/paypal/confirm", post(handlers::confirm_paypal::<R, S, P>))
        .route("/history", get(handlers::history::<R, S, P>))
        .route("/total-spent", get(handlers::total_spent::<R, S, P>))
        .route("/all", get(handlers::list_payments::<R, S, P>))
        .route("/stats", get(handlers::payment_stats::<R, S, P>))
        .route("/revenue/monthly", get(handlers::monthly_revenue::<R, S, P>))
        .route("/revenue/daily", get(handlers::daily_revenue::<R, S, P>))
        .route("/{id}", get(handlers::get_payment::<R, S, P>))
        .route("/{id}/cancel", put(handlers::cancel_payment::<R, S, P>))
        .route("/{id}/refund", put(handlers::refund_payment::<R, S, P>))
        .with_state(state)
}
