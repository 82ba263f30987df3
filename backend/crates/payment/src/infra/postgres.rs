//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::revenue::RevenueWindow;
use crate::domain::value_object::{
    AccountId, Amount, PaymentId, PaymentMethod, PaymentStatus, TransactionId,
};
use crate::error::{PaymentError, PaymentResult};

const PAYMENT_COLUMNS: &str = r#"
    payment_id,
    account_id,
    amount,
    currency,
    method,
    status,
    transaction_id,
    stripe_payment_intent_id,
    paypal_order_id,
    description,
    created_at,
    updated_at,
    completed_at
"#;

/// Column holding the provider reference for `method`
const fn correlation_column(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Stripe => "stripe_payment_intent_id",
        PaymentMethod::PayPal => "paypal_order_id",
    }
}

/// PostgreSQL-backed payment ledger
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for PgPaymentRepository {
    async fn create(&self, payment: &Payment) -> PaymentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                account_id,
                amount,
                currency,
                method,
                status,
                transaction_id,
                description,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.account_id.as_uuid())
        .bind(payment.amount.value())
        .bind(&payment.currency)
        .bind(payment.method.code())
        .bind(payment.status.code())
        .bind(payment.transaction_id.as_str())
        .bind(payment.description.as_deref())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn attach_correlation(
        &self,
        payment_id: &PaymentId,
        correlation_id: &str,
    ) -> PaymentResult<Payment> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            UPDATE payments SET
                stripe_payment_intent_id = CASE WHEN method = 'STRIPE' THEN $2 END,
                paypal_order_id = CASE WHEN method = 'PAYPAL' THEN $2 END,
                updated_at = now()
            WHERE payment_id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id.as_uuid())
        .bind(correlation_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(PaymentError::NotFound)?.into_payment()
    }

    async fn find_by_id(&self, payment_id: &PaymentId) -> PaymentResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE payment_id = $1"
        ))
        .bind(payment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn find_by_correlation(
        &self,
        method: PaymentMethod,
        correlation_id: &str,
    ) -> PaymentResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE method = $1 AND {} = $2",
            correlation_column(method)
        ))
        .bind(method.code())
        .bind(correlation_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn list_by_account(&self, account_id: &AccountId) -> PaymentResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS} FROM payments
            WHERE account_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn list(&self, status: Option<PaymentStatus>) -> PaymentResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS} FROM payments
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(status.map(|s| s.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn transition(
        &self,
        payment_id: &PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
        at: DateTime<Utc>,
    ) -> PaymentResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            UPDATE payments SET
                status = $3,
                updated_at = $4,
                completed_at = CASE WHEN $3 = 'COMPLETED' THEN $4 ELSE completed_at END
            WHERE payment_id = $1 AND status = $2
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id.as_uuid())
        .bind(from.code())
        .bind(to.code())
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn revenue_between(&self, window: &RevenueWindow) -> PaymentResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM payments
            WHERE status = 'COMPLETED'
              AND completed_at >= $1
              AND completed_at < $2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn total_completed_for(&self, account_id: &AccountId) -> PaymentResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM payments
            WHERE account_id = $1 AND status = 'COMPLETED'
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
    currency: String,
    method: String,
    status: String,
    transaction_id: String,
    stripe_payment_intent_id: Option<String>,
    paypal_order_id: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl PaymentRow {
    fn into_payment(self) -> PaymentResult<Payment> {
        let method = PaymentMethod::from_code(&self.method)
            .ok_or_else(|| PaymentError::Internal(format!("Invalid method: {}", self.method)))?;
        let status = PaymentStatus::from_code(&self.status)
            .ok_or_else(|| PaymentError::Internal(format!("Invalid status: {}", self.status)))?;

        let correlation_id = match method {
            PaymentMethod::Stripe => self.stripe_payment_intent_id,
            PaymentMethod::PayPal => self.paypal_order_id,
        };

        Ok(Payment {
            payment_id: PaymentId::from_uuid(self.payment_id),
            account_id: AccountId::from_uuid(self.account_id),
            amount: Amount::from_db(self.amount),
            currency: self.currency,
            method,
            status,
            transaction_id: TransactionId::from_db(self.transaction_id),
            correlation_id,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_column_per_method() {
        assert_eq!(
            correlation_column(PaymentMethod::Stripe),
            "stripe_payment_intent_id"
        );
        assert_eq!(correlation_column(PaymentMethod::PayPal), "paypal_order_id");
    }
}
