//! Provider Gateway Trait
//!
//! Stripe and PayPal sit behind the same two calls: open a checkout for a
//! pending payment, then settle it once the buyer has acted. Implementations
//! live in the infrastructure layer.

use crate::domain::entity::payment::Payment;
use crate::domain::value_object::PaymentMethod;
use crate::error::PaymentResult;

/// What the provider returned when the checkout was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// Payment-intent id or order id
    pub correlation_id: String,
    /// Stripe: secret the browser uses to confirm the card
    pub client_secret: Option<String>,
    /// PayPal: page the buyer is sent to for approval
    pub approval_url: Option<String>,
}

/// Provider verdict on a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOutcome {
    Succeeded,
    Failed,
    /// Buyer has not finished; the payment stays PENDING
    Pending,
}

impl ProviderOutcome {
    /// Payment-intent status: `succeeded` and `payment_failed` are final,
    /// everything else is still in progress.
    pub fn from_stripe_status(status: &str) -> Self {
        match status {
            "succeeded" => ProviderOutcome::Succeeded,
            "payment_failed" => ProviderOutcome::Failed,
            _ => ProviderOutcome::Pending,
        }
    }

    /// Order capture status: anything but `COMPLETED` fails the payment.
    pub fn from_paypal_capture_status(status: &str) -> Self {
        if status == "COMPLETED" {
            ProviderOutcome::Succeeded
        } else {
            ProviderOutcome::Failed
        }
    }
}

#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    fn method(&self) -> PaymentMethod;

    /// False when credentials are missing; calls would fail anyway
    fn is_configured(&self) -> bool;

    /// Create the provider-side intent or order for a PENDING payment
    async fn open(&self, payment: &Payment) -> PaymentResult<Checkout>;

    /// Retrieve or capture the provider-side object
    async fn settle(&self, correlation_id: &str) -> PaymentResult<ProviderOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripe_status_mapping() {
        assert_eq!(
            ProviderOutcome::from_stripe_status("succeeded"),
            ProviderOutcome::Succeeded
        );
        assert_eq!(
            ProviderOutcome::from_stripe_status("payment_failed"),
            ProviderOutcome::Failed
        );
        for status in ["requires_payment_method", "requires_action", "processing"] {
            assert_eq!(
                ProviderOutcome::from_stripe_status(status),
                ProviderOutcome::Pending
            );
        }
    }

    #[test]
    fn test_paypal_capture_mapping() {
        assert_eq!(
            ProviderOutcome::from_paypal_capture_status("COMPLETED"),
            ProviderOutcome::Succeeded
        );
        for status in ["DECLINED", "PENDING", "VOIDED", ""] {
            assert_eq!(
                ProviderOutcome::from_paypal_capture_status(status),
                ProviderOutcome::Failed
            );
        }
    }
}
