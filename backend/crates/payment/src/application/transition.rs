//! Status transition helper shared by the confirm, cancel and refund flows.

use chrono::Utc;

use crate::domain::entity::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentStatus;
use crate::error::{PaymentError, PaymentResult};

/// Move `payment` to `to`, failing with `InvalidState` when the machine forbids
/// it or a concurrent request changed the status first.
pub(crate) async fn apply<P>(
    repo: &P,
    payment: &Payment,
    to: PaymentStatus,
    attempted: &'static str,
) -> PaymentResult<Payment>
where
    P: PaymentRepository,
{
    if !payment.status.can_transition_to(to) {
        return Err(PaymentError::InvalidState {
            current: payment.status,
            attempted,
        });
    }

    match repo
        .transition(&payment.payment_id, payment.status, to, Utc::now())
        .await?
    {
        Some(updated) => {
            tracing::info!(
                payment_id = %updated.payment_id,
                transaction_id = %updated.transaction_id,
                from = %payment.status,
                to = %updated.status,
                "Payment status changed"
            );
            Ok(updated)
        }
        None => {
            let current = repo
                .find_by_id(&payment.payment_id)
                .await?
                .map(|p| p.status)
                .ok_or(PaymentError::NotFound)?;
            tracing::debug!(
                payment_id = %payment.payment_id,
                expected = %payment.status,
                current = %current,
                "Lost status race"
            );
            Err(PaymentError::InvalidState { current, attempted })
        }
    }
}
