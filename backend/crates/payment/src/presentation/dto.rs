//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{CreatedPayment, PaymentStats};
use crate::domain::entity::payment::Payment;
use crate::domain::value_object::{PaymentMethod, PaymentStatus};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts the provider-specific field names as well
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(alias = "paymentIntentId", alias = "orderId")]
    pub correlation_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPaymentsQuery {
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyRevenueQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyRevenueQuery {
    pub date: NaiveDate,
}

/// Defaults to the caller's own account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSpentQuery {
    pub account_id: Option<Uuid>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub correlation_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.payment_id.into_uuid(),
            amount: payment.amount.value(),
            currency: payment.currency.clone(),
            status: payment.status,
            method: payment.method,
            transaction_id: payment.transaction_id.as_str().to_string(),
            correlation_id: payment.correlation_id.clone(),
            description: payment.description.clone(),
            created_at: payment.created_at,
            updated_at: payment.updated_at,
            completed_at: payment.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEnvelope {
    pub payment: PaymentResponse,
}

impl From<&Payment> for PaymentEnvelope {
    fn from(payment: &Payment) -> Self {
        Self {
            payment: PaymentResponse::from(payment),
        }
    }
}

/// Returned by the create endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub payment: PaymentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_url: Option<String>,
}

impl From<CreatedPayment> for CheckoutResponse {
    fn from(created: CreatedPayment) -> Self {
        Self {
            payment: PaymentResponse::from(&created.payment),
            client_secret: created.checkout.client_secret,
            approval_url: created.checkout.approval_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsEnvelope {
    pub payments: Vec<PaymentResponse>,
    pub count: usize,
}

impl From<Vec<Payment>> for PaymentsEnvelope {
    fn from(payments: Vec<Payment>) -> Self {
        let payments: Vec<PaymentResponse> = payments.iter().map(PaymentResponse::from).collect();
        Self {
            count: payments.len(),
            payments,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_revenue: Decimal,
}

impl From<PaymentStats> for PaymentStatsResponse {
    fn from(stats: PaymentStats) -> Self {
        Self {
            monthly_revenue: stats.monthly_revenue,
            daily_revenue: stats.daily_revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSpentResponse {
    pub account_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_spent: Decimal,
}
