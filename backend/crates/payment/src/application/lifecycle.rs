//! Cancel / Refund Use Case
//!
//! Refund is a local status flip only; no money moves at the provider.

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};

use crate::application::transition;
use crate::domain::entity::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::{PaymentId, PaymentStatus};
use crate::error::{PaymentError, PaymentResult};

pub struct PaymentLifecycleUseCase<P>
where
    P: PaymentRepository,
{
    payment_repo: Arc<P>,
}

impl<P> PaymentLifecycleUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    /// PENDING only; owner or admin
    pub async fn cancel(&self, caller: &Caller, payment_id: &PaymentId) -> PaymentResult<Payment> {
        let payment = self.load(payment_id).await?;
        authorize(caller, Some(&payment.account_id), Action::Cancel)?;
        transition::apply(
            self.payment_repo.as_ref(),
            &payment,
            PaymentStatus::Cancelled,
            "cancel",
        )
        .await
    }

    /// COMPLETED only; admin
    pub async fn refund(&self, caller: &Caller, payment_id: &PaymentId) -> PaymentResult<Payment> {
        authorize(caller, None, Action::Refund)?;
        let payment = self.load(payment_id).await?;
        let refunded = transition::apply(
            self.payment_repo.as_ref(),
            &payment,
            PaymentStatus::Refunded,
            "refund",
        )
        .await?;

        tracing::info!(
            payment_id = %refunded.payment_id,
            admin_id = %caller.account_id,
            "Payment marked refunded"
        );
        Ok(refunded)
    }

    async fn load(&self, payment_id: &PaymentId) -> PaymentResult<Payment> {
        self.payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or(PaymentError::NotFound)
    }
}
