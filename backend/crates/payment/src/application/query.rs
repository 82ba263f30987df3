//! Payment Queries
//!
//! Single payment, history, admin listing and revenue figures.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use kernel::access::{Action, Caller, authorize};
use rust_decimal::Decimal;

use crate::domain::entity::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::revenue::RevenueWindow;
use crate::domain::value_object::{AccountId, PaymentId, PaymentStatus};
use crate::error::{PaymentError, PaymentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStats {
    pub monthly_revenue: Decimal,
    pub daily_revenue: Decimal,
}

pub struct PaymentQueryUseCase<P>
where
    P: PaymentRepository,
{
    payment_repo: Arc<P>,
}

impl<P> PaymentQueryUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    pub async fn get(&self, caller: &Caller, payment_id: &PaymentId) -> PaymentResult<Payment> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or(PaymentError::NotFound)?;
        authorize(caller, Some(&payment.account_id), Action::Read)?;
        Ok(payment)
    }

    /// The caller's own payments, newest first
    pub async fn history(&self, caller: &Caller) -> PaymentResult<Vec<Payment>> {
        self.payment_repo.list_by_account(&caller.account_id).await
    }

    pub async fn list(
        &self,
        caller: &Caller,
        status: Option<PaymentStatus>,
    ) -> PaymentResult<Vec<Payment>> {
        authorize(caller, None, Action::Administer)?;
        self.payment_repo.list(status).await
    }

    pub async fn monthly_revenue(
        &self,
        caller: &Caller,
        year: i32,
        month: u32,
    ) -> PaymentResult<Decimal> {
        authorize(caller, None, Action::Administer)?;
        let window = RevenueWindow::month(year, month)?;
        self.payment_repo.revenue_between(&window).await
    }

    pub async fn daily_revenue(&self, caller: &Caller, date: NaiveDate) -> PaymentResult<Decimal> {
        authorize(caller, None, Action::Administer)?;
        let window = RevenueWindow::day(date)?;
        self.payment_repo.revenue_between(&window).await
    }

    /// Completed spend of `account_id`; owner or admin
    pub async fn total_spent(
        &self,
        caller: &Caller,
        account_id: &AccountId,
    ) -> PaymentResult<Decimal> {
        authorize(caller, Some(account_id), Action::Read)?;
        self.payment_repo.total_completed_for(account_id).await
    }

    /// Revenue of the current UTC month and day
    pub async fn stats(&self, caller: &Caller) -> PaymentResult<PaymentStats> {
        let today = Utc::now().date_naive();
        Ok(PaymentStats {
            monthly_revenue: self
                .monthly_revenue(caller, today.year(), today.month())
                .await?,
            daily_revenue: self.daily_revenue(caller, today).await?,
        })
    }
}
