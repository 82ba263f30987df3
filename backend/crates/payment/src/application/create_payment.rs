//! Create Payment Use Case
//!
//! Records a PENDING payment, then opens the checkout with the provider.
//! The row is written first so that a provider failure still leaves a trace.

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};
use rust_decimal::Decimal;

use crate::application::config::PaymentConfig;
use crate::domain::entity::payment::Payment;
use crate::domain::gateway::{Checkout, PaymentGateway};
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::Amount;
use crate::error::{PaymentError, PaymentResult};

pub const DESCRIPTION_MAX_LENGTH: usize = 500;

pub struct CreatePaymentInput {
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Stored payment plus what the browser needs to finish the checkout
#[derive(Debug, Clone)]
pub struct CreatedPayment {
    pub payment: Payment,
    pub checkout: Checkout,
}

pub struct CreatePaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    payment_repo: Arc<P>,
    gateway: Arc<G>,
    config: Arc<PaymentConfig>,
}

impl<P, G> CreatePaymentUseCase<P, G>
where
    P: PaymentRepository,
    G: PaymentGateway,
{
    pub fn new(payment_repo: Arc<P>, gateway: Arc<G>, config: Arc<PaymentConfig>) -> Self {
        Self {
            payment_repo,
            gateway,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &Caller,
        input: CreatePaymentInput,
    ) -> PaymentResult<CreatedPayment> {
        authorize(caller, None, Action::Create)?;

        let amount = Amount::new(input.amount)?;
        let description = normalize_description(input.description)?;

        let method = self.gateway.method();
        if !self.gateway.is_configured() {
            return Err(PaymentError::ProviderUnavailable(method.provider_name()));
        }

        let payment = Payment::new(
            caller.account_id,
            amount,
            &self.config.currency,
            method,
            description,
        );
        self.payment_repo.create(&payment).await?;

        let checkout = match self.gateway.open(&payment).await {
            Ok(checkout) => checkout,
            Err(e) => {
                tracing::warn!(
                    payment_id = %payment.payment_id,
                    transaction_id = %payment.transaction_id,
                    provider = method.provider_name(),
                    error = %e,
                    "Checkout could not be opened"
                );
                return Err(e);
            }
        };

        let payment = self
            .payment_repo
            .attach_correlation(&payment.payment_id, &checkout.correlation_id)
            .await?;

        tracing::info!(
            payment_id = %payment.payment_id,
            account_id = %payment.account_id,
            transaction_id = %payment.transaction_id,
            method = %payment.method,
            amount = %payment.amount,
            "Payment created"
        );

        Ok(CreatedPayment { payment, checkout })
    }
}

fn normalize_description(description: Option<String>) -> PaymentResult<Option<String>> {
    let Some(description) = description else {
        return Ok(None);
    };

    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(PaymentError::InvalidInput(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_LENGTH
        )));
    }

    Ok(Some(trimmed.to_string()))
}
