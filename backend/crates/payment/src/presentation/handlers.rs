//! HTTP Handlers

use axum::extract::{Path, Query, State};
use kernel::access::Caller;
use kernel::response::{ApiJson, ApiResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::PaymentConfig;
use crate::application::{
    ConfirmPaymentUseCase, CreatePaymentInput, CreatePaymentUseCase, PaymentLifecycleUseCase,
    PaymentQueryUseCase,
};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::{AccountId, PaymentId};
use crate::error::PaymentResult;
use crate::presentation::dto::{
    CheckoutResponse, ConfirmPaymentRequest, CreatePaymentRequest, DailyRevenueQuery,
    ListPaymentsQuery, MonthlyRevenueQuery, PaymentEnvelope, PaymentStatsResponse,
    PaymentsEnvelope, RevenueResponse, TotalSpentQuery, TotalSpentResponse,
};

/// Shared state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState<R, S, P>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub stripe: Arc<S>,
    pub paypal: Arc<P>,
    pub config: Arc<PaymentConfig>,
}

async fn create<R, G>(
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<PaymentConfig>,
    caller: &Caller,
    req: CreatePaymentRequest,
) -> PaymentResult<CheckoutResponse>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    let created = CreatePaymentUseCase::new(repo, gateway, config)
        .execute(
            caller,
            CreatePaymentInput {
                amount: req.amount,
                description: req.description,
            },
        )
        .await?;
    Ok(created.into())
}

// ============================================================================
// Checkout
// ============================================================================

/// POST /api/payments/stripe/create
pub async fn create_stripe<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    ApiJson(req): ApiJson<CreatePaymentRequest>,
) -> PaymentResult<ApiResponse<CheckoutResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let checkout = create(
        state.repo.clone(),
        state.stripe.clone(),
        state.config.clone(),
        &caller,
        req,
    )
    .await?;

    Ok(ApiResponse::created(
        "Stripe payment created successfully",
        checkout,
    ))
}

/// POST /api/payments/paypal/create
pub async fn create_paypal<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    ApiJson(req): ApiJson<CreatePaymentRequest>,
) -> PaymentResult<ApiResponse<CheckoutResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let checkout = create(
        state.repo.clone(),
        state.paypal.clone(),
        state.config.clone(),
        &caller,
        req,
    )
    .await?;

    Ok(ApiResponse::created(
        "PayPal payment created successfully",
        checkout,
    ))
}

/// POST /api/payments/stripe/confirm
pub async fn confirm_stripe<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    ApiJson(req): ApiJson<ConfirmPaymentRequest>,
) -> PaymentResult<ApiResponse<PaymentEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payment = ConfirmPaymentUseCase::new(state.repo.clone(), state.stripe.clone())
        .execute(&caller, &req.correlation_id)
        .await?;

    Ok(ApiResponse::ok(
        "Payment confirmed successfully",
        PaymentEnvelope::from(&payment),
    ))
}

/// POST /api/payments/paypal/confirm
pub async fn confirm_paypal<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    ApiJson(req): ApiJson<ConfirmPaymentRequest>,
) -> PaymentResult<ApiResponse<PaymentEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payment = ConfirmPaymentUseCase::new(state.repo.clone(), state.paypal.clone())
        .execute(&caller, &req.correlation_id)
        .await?;

    Ok(ApiResponse::ok(
        "PayPal payment confirmed successfully",
        PaymentEnvelope::from(&payment),
    ))
}

// ============================================================================
// Owner
// ============================================================================

/// GET /api/payments/history
pub async fn history<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
) -> PaymentResult<ApiResponse<PaymentsEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payments = PaymentQueryUseCase::new(state.repo.clone())
        .history(&caller)
        .await?;

    Ok(ApiResponse::ok("Payment history retrieved", payments.into()))
}

/// GET /api/payments/total-spent[?accountId=]
pub async fn total_spent<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Query(query): Query<TotalSpentQuery>,
) -> PaymentResult<ApiResponse<TotalSpentResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let account_id = query
        .account_id
        .map(AccountId::from_uuid)
        .unwrap_or(caller.account_id);

    let total_spent = PaymentQueryUseCase::new(state.repo.clone())
        .total_spent(&caller, &account_id)
        .await?;

    Ok(ApiResponse::ok(
        "Total spent",
        TotalSpentResponse {
            account_id: account_id.into_uuid(),
            total_spent,
        },
    ))
}

/// GET /api/payments/{id}
pub async fn get_payment<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> PaymentResult<ApiResponse<PaymentEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payment = PaymentQueryUseCase::new(state.repo.clone())
        .get(&caller, &PaymentId::from_uuid(id))
        .await?;

    Ok(ApiResponse::ok(
        "Payment retrieved",
        PaymentEnvelope::from(&payment),
    ))
}

/// PUT /api/payments/{id}/cancel
pub async fn cancel_payment<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> PaymentResult<ApiResponse<PaymentEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payment = PaymentLifecycleUseCase::new(state.repo.clone())
        .cancel(&caller, &PaymentId::from_uuid(id))
        .await?;

    Ok(ApiResponse::ok(
        "Payment cancelled successfully",
        PaymentEnvelope::from(&payment),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// PUT /api/payments/{id}/refund
pub async fn refund_payment<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> PaymentResult<ApiResponse<PaymentEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payment = PaymentLifecycleUseCase::new(state.repo.clone())
        .refund(&caller, &PaymentId::from_uuid(id))
        .await?;

    Ok(ApiResponse::ok(
        "Payment refunded successfully",
        PaymentEnvelope::from(&payment),
    ))
}

/// GET /api/payments/all?status=
pub async fn list_payments<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Query(query): Query<ListPaymentsQuery>,
) -> PaymentResult<ApiResponse<PaymentsEnvelope>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let payments = PaymentQueryUseCase::new(state.repo.clone())
        .list(&caller, query.status)
        .await?;

    Ok(ApiResponse::ok("Payments retrieved", payments.into()))
}

/// GET /api/payments/stats
pub async fn payment_stats<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
) -> PaymentResult<ApiResponse<PaymentStatsResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let stats = PaymentQueryUseCase::new(state.repo.clone())
        .stats(&caller)
        .await?;

    Ok(ApiResponse::ok("Payment statistics", stats.into()))
}

/// GET /api/payments/revenue/monthly?year=&month=
pub async fn monthly_revenue<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Query(query): Query<MonthlyRevenueQuery>,
) -> PaymentResult<ApiResponse<RevenueResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let revenue = PaymentQueryUseCase::new(state.repo.clone())
        .monthly_revenue(&caller, query.year, query.month)
        .await?;

    Ok(ApiResponse::ok("Monthly revenue", RevenueResponse { revenue }))
}

/// GET /api/payments/revenue/daily?date=YYYY-MM-DD
pub async fn daily_revenue<R, S, P>(
    State(state): State<PaymentAppState<R, S, P>>,
    caller: Caller,
    Query(query): Query<DailyRevenueQuery>,
) -> PaymentResult<ApiResponse<RevenueResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
    S: PaymentGateway + Clone + Send + Sync + 'static,
    P: PaymentGateway + Clone + Send + Sync + 'static,
{
    let revenue = PaymentQueryUseCase::new(state.repo.clone())
        .daily_revenue(&caller, query.date)
        .await?;

    Ok(ApiResponse::ok("Daily revenue", RevenueResponse { revenue }))
}
