//! Repository Traits
//!
//! Payment ledger interface. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entity::payment::Payment;
use crate::domain::revenue::RevenueWindow;
use crate::domain::value_object::{AccountId, PaymentId, PaymentMethod, PaymentStatus};
use crate::error::PaymentResult;

#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create(&self, payment: &Payment) -> PaymentResult<()>;

    /// Record the provider's intent or order id on a payment
    async fn attach_correlation(
        &self,
        payment_id: &PaymentId,
        correlation_id: &str,
    ) -> PaymentResult<Payment>;

    async fn find_by_id(&self, payment_id: &PaymentId) -> PaymentResult<Option<Payment>>;

    async fn find_by_correlation(
        &self,
        method: PaymentMethod,
        correlation_id: &str,
    ) -> PaymentResult<Option<Payment>>;

    /// Payments of one account, newest first
    async fn list_by_account(&self, account_id: &AccountId) -> PaymentResult<Vec<Payment>>;

    /// All payments, optionally filtered by status, newest first
    async fn list(&self, status: Option<PaymentStatus>) -> PaymentResult<Vec<Payment>>;

    /// Compare-and-set the status.
    ///
    /// Returns `None` when the stored status is no longer `from`. Moving to
    /// COMPLETED stamps `completed_at` with `at`.
    async fn transition(
        &self,
        payment_id: &PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
        at: DateTime<Utc>,
    ) -> PaymentResult<Option<Payment>>;

    /// Sum of COMPLETED amounts whose `completed_at` falls in the window; zero when none
    async fn revenue_between(&self, window: &RevenueWindow) -> PaymentResult<Decimal>;

    /// Sum of one account's COMPLETED amounts; zero when none
    async fn total_completed_for(&self, account_id: &AccountId) -> PaymentResult<Decimal>;
}
