//! Confirm Payment Use Case
//!
//! Asks the provider how the checkout ended and records the verdict.

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};

use crate::application::transition;
use crate::domain::entity::payment::Payment;
use crate::domain::gateway::{PaymentGateway, ProviderOutcome};
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentStatus;
use crate::error::{PaymentError, PaymentResult};

pub struct ConfirmPaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    payment_repo: Arc<P>,
    gateway: Arc<G>,
}

impl<P, G> ConfirmPaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    pub fn new(payment_repo: Arc<P>, gateway: Arc<G>) -> Self {
        Self {
            payment_repo,
            gateway,
        }
    }

    /// `correlation_id` is the Stripe payment-intent id or the PayPal order id
    pub async fn execute(&self, caller: &Caller, correlation_id: &str) -> PaymentResult<Payment> {
        let correlation_id = correlation_id.trim();
        if correlation_id.is_empty() {
            return Err(PaymentError::InvalidInput(
                "Provider reference is required".to_string(),
            ));
        }

        let method = self.gateway.method();
        let payment = self
            .payment_repo
            .find_by_correlation(method, correlation_id)
            .await?
            .ok_or(PaymentError::NotFound)?;

        authorize(caller, Some(&payment.account_id), Action::Confirm)?;

        if !payment.is_pending() {
            return Err(PaymentError::InvalidState {
                current: payment.status,
                attempted: "confirm",
            });
        }

        if !self.gateway.is_configured() {
            return Err(PaymentError::ProviderUnavailable(method.provider_name()));
        }

        let next = match self.gateway.settle(correlation_id).await? {
            ProviderOutcome::Succeeded => PaymentStatus::Completed,
            ProviderOutcome::Failed => PaymentStatus::Failed,
            ProviderOutcome::Pending => {
                tracing::debug!(
                    payment_id = %payment.payment_id,
                    provider = method.provider_name(),
                    "Provider reports checkout still in progress"
                );
                return Ok(payment);
            }
        };

        transition::apply(self.payment_repo.as_ref(), &payment, next, "confirm").await
    }
}
