//! Payment Entity
//!
//! One checkout attempt through a single provider. Payments are never deleted;
//! status only moves along [`PaymentStatus::can_transition_to`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    AccountId, Amount, PaymentId, PaymentMethod, PaymentStatus, TransactionId,
};

#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub account_id: AccountId,
    pub amount: Amount,
    /// ISO 4217 code, upper-case
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: TransactionId,
    /// Stripe payment-intent id or PayPal order id, set once the provider answers
    pub correlation_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// New PENDING payment with a fresh transaction id
    pub fn new(
        account_id: AccountId,
        amount: Amount,
        currency: impl Into<String>,
        method: PaymentMethod,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            payment_id: PaymentId::new(),
            account_id,
            amount,
            currency: currency.into().to_ascii_uppercase(),
            method,
            status: PaymentStatus::Pending,
            transaction_id: TransactionId::generate(now),
            correlation_id: None,
            description,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_new_payment_is_pending_without_correlation() {
        let payment = Payment::new(
            AccountId::new(),
            Amount::new(Decimal::new(1999, 2)).unwrap(),
            "inr",
            PaymentMethod::Stripe,
            Some("Order #42".to_string()),
        );

        assert!(payment.is_pending());
        assert_eq!(payment.currency, "INR");
        assert!(payment.correlation_id.is_none());
        assert!(payment.completed_at.is_none());
        assert!(payment.transaction_id.as_str().starts_with("TXN_"));
    }
}
