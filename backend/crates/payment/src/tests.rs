//! Unit tests for the payment crate
//!
//! Use cases and the router run against an in-memory ledger and scripted
//! provider gateways.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use kernel::access::{Caller, Role};
use rust_decimal::Decimal;

use crate::application::config::PaymentConfig;
use crate::domain::entity::payment::Payment;
use crate::domain::gateway::{Checkout, PaymentGateway, ProviderOutcome};
use crate::domain::repository::PaymentRepository;
use crate::domain::revenue::RevenueWindow;
use crate::domain::value_object::{
    AccountId, Amount, PaymentId, PaymentMethod, PaymentStatus,
};
use crate::error::{PaymentError, PaymentResult};

/// In-memory ledger; `transition` is a compare-and-set like the SQL version.
#[derive(Clone, Default)]
pub(crate) struct InMemoryPayments {
    payments: Arc<Mutex<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPayments {
    fn insert(&self, payment: Payment) {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.payment_id, payment);
    }

    fn get(&self, payment_id: &PaymentId) -> Option<Payment> {
        self.payments.lock().unwrap().get(payment_id).cloned()
    }

    fn len(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    fn newest_first(&self, keep: impl Fn(&Payment) -> bool) -> Vec<Payment> {
        let mut payments: Vec<Payment> = self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| keep(p))
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payments
    }
}

impl PaymentRepository for InMemoryPayments {
    async fn create(&self, payment: &Payment) -> PaymentResult<()> {
        self.insert(payment.clone());
        Ok(())
    }

    async fn attach_correlation(
        &self,
        payment_id: &PaymentId,
        correlation_id: &str,
    ) -> PaymentResult<Payment> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments.get_mut(payment_id).ok_or(PaymentError::NotFound)?;
        payment.correlation_id = Some(correlation_id.to_string());
        payment.updated_at = Utc::now();
        Ok(payment.clone())
    }

    async fn find_by_id(&self, payment_id: &PaymentId) -> PaymentResult<Option<Payment>> {
        Ok(self.get(payment_id))
    }

    async fn find_by_correlation(
        &self,
        method: PaymentMethod,
        correlation_id: &str,
    ) -> PaymentResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .find(|p| p.method == method && p.correlation_id.as_deref() == Some(correlation_id))
            .cloned())
    }

    async fn list_by_account(&self, account_id: &AccountId) -> PaymentResult<Vec<Payment>> {
        Ok(self.newest_first(|p| &p.account_id == account_id))
    }

    async fn list(&self, status: Option<PaymentStatus>) -> PaymentResult<Vec<Payment>> {
        Ok(self.newest_first(|p| status.is_none_or(|s| p.status == s)))
    }

    async fn transition(
        &self,
        payment_id: &PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
        at: DateTime<Utc>,
    ) -> PaymentResult<Option<Payment>> {
        let mut payments = self.payments.lock().unwrap();
        match payments.get_mut(payment_id) {
            Some(payment) if payment.status == from => {
                payment.status = to;
                payment.updated_at = at;
                if to == PaymentStatus::Completed {
                    payment.completed_at = Some(at);
                }
                Ok(Some(payment.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn total_completed_for(&self, account_id: &AccountId) -> PaymentResult<Decimal> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| &p.account_id == account_id && p.status == PaymentStatus::Completed)
            .map(|p| p.amount.value())
            .sum())
    }

    async fn revenue_between(&self, window: &RevenueWindow) -> PaymentResult<Decimal> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == PaymentStatus::Completed)
            .filter(|p| p.completed_at.is_some_and(|at| window.contains(at)))
            .map(|p| p.amount.value())
            .sum())
    }
}

/// Provider double: `open` hands out predictable ids, `settle` returns the
/// scripted outcome.
#[derive(Clone)]
pub(crate) struct FakeGateway {
    method: PaymentMethod,
    configured: bool,
    open_error: Option<String>,
    outcome: Arc<Mutex<ProviderOutcome>>,
}

impl FakeGateway {
    fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            configured: true,
            open_error: None,
            outcome: Arc::new(Mutex::new(ProviderOutcome::Succeeded)),
        }
    }

    fn unconfigured(method: PaymentMethod) -> Self {
        Self {
            configured: false,
            ..Self::new(method)
        }
    }

    fn failing_open(method: PaymentMethod, message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::new(method)
        }
    }

    fn will_settle(&self, outcome: ProviderOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

impl PaymentGateway for FakeGateway {
    fn method(&self) -> PaymentMethod {
        self.method
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn open(&self, payment: &Payment) -> PaymentResult<Checkout> {
        if let Some(message) = &self.open_error {
            return Err(PaymentError::provider(
                self.method.provider_name(),
                message.clone(),
            ));
        }
        let correlation_id = match self.method {
            PaymentMethod::Stripe => format!("pi_{}", payment.payment_id.as_uuid().simple()),
            PaymentMethod::PayPal => format!("ORDER-{}", payment.transaction_id),
        };
        Ok(Checkout {
            client_secret: (self.method == PaymentMethod::Stripe)
                .then(|| format!("{correlation_id}_secret")),
            approval_url: (self.method == PaymentMethod::PayPal)
                .then(|| format!("https://paypal.test/approve/{correlation_id}")),
            correlation_id,
        })
    }

    async fn settle(&self, _correlation_id: &str) -> PaymentResult<ProviderOutcome> {
        Ok(*self.outcome.lock().unwrap())
    }
}

fn config() -> Arc<PaymentConfig> {
    Arc::new(PaymentConfig::development())
}

fn user() -> Caller {
    Caller::new(AccountId::new(), "buyer@example.com", Role::User)
}

fn admin() -> Caller {
    Caller::new(AccountId::new(), "admin@example.com", Role::Admin)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Stored payment in `status`, bypassing the workflow
fn seed(
    repo: &InMemoryPayments,
    owner: &Caller,
    amount: &str,
    status: PaymentStatus,
    completed_at: Option<DateTime<Utc>>,
) -> Payment {
    let mut payment = Payment::new(
        owner.account_id,
        Amount::new(dec(amount)).unwrap(),
        "INR",
        PaymentMethod::Stripe,
        None,
    );
    payment.status = status;
    payment.completed_at = completed_at;
    payment.correlation_id = Some(format!("pi_{}", payment.payment_id.as_uuid().simple()));
    repo.insert(payment.clone());
    payment
}

#[cfg(test)]
mod create_tests {
    use super::*;
    use crate::application::{CreatePaymentInput, CreatePaymentUseCase};

    fn input(amount: &str) -> CreatePaymentInput {
        CreatePaymentInput {
            amount: dec(amount),
            description: Some("Wireless mouse".to_string()),
        }
    }

    #[tokio::test]
    async fn test_stripe_checkout_stores_pending_payment_with_intent() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::Stripe));
        let caller = user();

        let created = CreatePaymentUseCase::new(repo.clone(), gateway, config())
            .execute(&caller, input("499.50"))
            .await
            .unwrap();

        let stored = repo.get(&created.payment.payment_id).unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert_eq!(stored.account_id, caller.account_id);
        assert_eq!(stored.currency, "INR");
        assert_eq!(stored.amount.value(), dec("499.50"));
        assert_eq!(stored.correlation_id, Some(created.checkout.correlation_id.clone()));
        assert!(created.checkout.client_secret.is_some());
    }

    #[tokio::test]
    async fn test_paypal_checkout_returns_approval_url() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::PayPal));

        let created = CreatePaymentUseCase::new(repo, gateway, config())
            .execute(&user(), input("20"))
            .await
            .unwrap();

        assert_eq!(created.payment.method, PaymentMethod::PayPal);
        assert!(created.checkout.approval_url.is_some());
        assert!(created.checkout.client_secret.is_none());
    }

    #[tokio::test]
    async fn test_invalid_amounts_store_nothing() {
        let repo = Arc::new(InMemoryPayments::default());
        let use_case = CreatePaymentUseCase::new(
            repo.clone(),
            Arc::new(FakeGateway::new(PaymentMethod::Stripe)),
            config(),
        );

        for amount in ["0", "-1.00", "1.005"] {
            let result = use_case.execute(&user(), input(amount)).await;
            assert!(
                matches!(result, Err(PaymentError::InvalidInput(_))),
                "amount {amount} should be rejected"
            );
        }
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_pending_row() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::failing_open(
            PaymentMethod::Stripe,
            "Your card was declined.",
        ));

        let err = CreatePaymentUseCase::new(repo.clone(), gateway, config())
            .execute(&user(), input("10.00"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Provider { .. }));
        assert!(err.to_string().contains("Your card was declined."));

        let stored = repo.newest_first(|_| true);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, PaymentStatus::Pending);
        assert!(stored[0].correlation_id.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unavailable() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::unconfigured(PaymentMethod::PayPal));

        let result = CreatePaymentUseCase::new(repo.clone(), gateway, config())
            .execute(&user(), input("10.00"))
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::ProviderUnavailable("PayPal"))
        ));
        assert_eq!(repo.len(), 0);
    }
}

#[cfg(test)]
mod confirm_tests {
    use super::*;
    use crate::application::{
        ConfirmPaymentUseCase, CreatePaymentInput, CreatePaymentUseCase, CreatedPayment,
    };

    async fn checkout(
        repo: &Arc<InMemoryPayments>,
        gateway: &Arc<FakeGateway>,
        caller: &Caller,
    ) -> CreatedPayment {
        CreatePaymentUseCase::new(repo.clone(), gateway.clone(), config())
            .execute(
                caller,
                CreatePaymentInput {
                    amount: dec("250.00"),
                    description: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_succeeded_intent_completes_payment() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::Stripe));
        let caller = user();
        let created = checkout(&repo, &gateway, &caller).await;

        let payment = ConfirmPaymentUseCase::new(repo.clone(), gateway)
            .execute(&caller, &created.checkout.correlation_id)
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_and_in_progress_intents() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::Stripe));
        let caller = user();
        let use_case = ConfirmPaymentUseCase::new(repo.clone(), gateway.clone());

        let created = checkout(&repo, &gateway, &caller).await;
        gateway.will_settle(ProviderOutcome::Pending);
        let payment = use_case
            .execute(&caller, &created.checkout.correlation_id)
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);

        gateway.will_settle(ProviderOutcome::Failed);
        let payment = use_case
            .execute(&caller, &created.checkout.correlation_id)
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
        assert!(payment.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_confirming_twice_is_invalid_state() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::PayPal));
        let caller = user();
        let created = checkout(&repo, &gateway, &caller).await;
        let use_case = ConfirmPaymentUseCase::new(repo.clone(), gateway);

        use_case
            .execute(&caller, &created.checkout.correlation_id)
            .await
            .unwrap();
        let second = use_case
            .execute(&caller, &created.checkout.correlation_id)
            .await;

        assert!(matches!(
            second,
            Err(PaymentError::InvalidState {
                current: PaymentStatus::Completed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_only_owner_or_admin_may_confirm() {
        let repo = Arc::new(InMemoryPayments::default());
        let gateway = Arc::new(FakeGateway::new(PaymentMethod::Stripe));
        let owner = user();
        let created = checkout(&repo, &gateway, &owner).await;
        let use_case = ConfirmPaymentUseCase::new(repo.clone(), gateway);

        let stranger = use_case
            .execute(&user(), &created.checkout.correlation_id)
            .await;
        assert!(matches!(stranger, Err(PaymentError::Forbidden(_))));

        let payment = use_case
            .execute(&admin(), &created.checkout.correlation_id)
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_unknown_or_other_provider_reference_is_not_found() {
        let repo = Arc::new(InMemoryPayments::default());
        let stripe = Arc::new(FakeGateway::new(PaymentMethod::Stripe));
        let paypal = Arc::new(FakeGateway::new(PaymentMethod::PayPal));
        let caller = user();
        let created = checkout(&repo, &stripe, &caller).await;

        let unknown = ConfirmPaymentUseCase::new(repo.clone(), stripe)
            .execute(&caller, "pi_does_not_exist")
            .await;
        assert!(matches!(unknown, Err(PaymentError::NotFound)));

        // a Stripe intent id is not a PayPal order id
        let wrong_provider = ConfirmPaymentUseCase::new(repo.clone(), paypal)
            .execute(&caller, &created.checkout.correlation_id)
            .await;
        assert!(matches!(wrong_provider, Err(PaymentError::NotFound)));
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;
    use crate::application::PaymentLifecycleUseCase;
    use crate::application::transition;

    #[tokio::test]
    async fn test_cancel_only_from_pending() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let pending = seed(&repo, &owner, "10.00", PaymentStatus::Pending, None);
        let completed = seed(&repo, &owner, "10.00", PaymentStatus::Completed, Some(Utc::now()));
        let use_case = PaymentLifecycleUseCase::new(repo.clone());

        let cancelled = use_case.cancel(&owner, &pending.payment_id).await.unwrap();
        assert_eq!(cancelled.status, PaymentStatus::Cancelled);

        let result = use_case.cancel(&owner, &completed.payment_id).await;
        assert!(matches!(result, Err(PaymentError::InvalidState { .. })));
        assert_eq!(
            repo.get(&completed.payment_id).unwrap().status,
            PaymentStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_cancel_requires_owner_or_admin() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let payment = seed(&repo, &owner, "10.00", PaymentStatus::Pending, None);
        let use_case = PaymentLifecycleUseCase::new(repo.clone());

        let result = use_case.cancel(&user(), &payment.payment_id).await;
        assert!(matches!(result, Err(PaymentError::Forbidden(_))));

        let cancelled = use_case.cancel(&admin(), &payment.payment_id).await.unwrap();
        assert_eq!(cancelled.status, PaymentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_refund_is_admin_only_and_from_completed() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let completed = seed(&repo, &owner, "99.99", PaymentStatus::Completed, Some(Utc::now()));
        let pending = seed(&repo, &owner, "5.00", PaymentStatus::Pending, None);
        let use_case = PaymentLifecycleUseCase::new(repo.clone());

        let result = use_case.refund(&owner, &completed.payment_id).await;
        assert!(matches!(result, Err(PaymentError::Forbidden(_))));

        let refunded = use_case.refund(&admin(), &completed.payment_id).await.unwrap();
        assert_eq!(refunded.status, PaymentStatus::Refunded);

        let result = use_case.refund(&admin(), &pending.payment_id).await;
        assert!(matches!(
            result,
            Err(PaymentError::InvalidState {
                current: PaymentStatus::Pending,
                attempted: "refund",
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_payment_is_not_found() {
        let repo = Arc::new(InMemoryPayments::default());
        let result = PaymentLifecycleUseCase::new(repo)
            .cancel(&user(), &PaymentId::new())
            .await;
        assert!(matches!(result, Err(PaymentError::NotFound)));
    }

    #[tokio::test]
    async fn test_stale_read_loses_the_race() {
        let repo = InMemoryPayments::default();
        let owner = user();
        let stale = seed(&repo, &owner, "10.00", PaymentStatus::Pending, None);

        // another request cancels first
        repo.transition(
            &stale.payment_id,
            PaymentStatus::Pending,
            PaymentStatus::Cancelled,
            Utc::now(),
        )
        .await
        .unwrap();

        let result = transition::apply(&repo, &stale, PaymentStatus::Completed, "confirm").await;
        assert!(matches!(
            result,
            Err(PaymentError::InvalidState {
                current: PaymentStatus::Cancelled,
                ..
            })
        ));
        assert!(repo.get(&stale.payment_id).unwrap().completed_at.is_none());
    }
}

#[cfg(test)]
mod query_tests {
    use super::*;
    use crate::application::PaymentQueryUseCase;
    use chrono::{NaiveDate, TimeZone};

    #[tokio::test]
    async fn test_history_is_own_payments_newest_first() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let older = seed(&repo, &owner, "1.00", PaymentStatus::Pending, None);
        let mut newer = seed(&repo, &owner, "2.00", PaymentStatus::Pending, None);
        newer.created_at = older.created_at + Duration::seconds(5);
        repo.insert(newer.clone());
        seed(&repo, &user(), "3.00", PaymentStatus::Pending, None);

        let history = PaymentQueryUseCase::new(repo)
            .history(&owner)
            .await
            .unwrap();

        let ids: Vec<PaymentId> = history.iter().map(|p| p.payment_id).collect();
        assert_eq!(ids, vec![newer.payment_id, older.payment_id]);
    }

    #[tokio::test]
    async fn test_get_requires_owner_or_admin() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let payment = seed(&repo, &owner, "1.00", PaymentStatus::Pending, None);
        let use_case = PaymentQueryUseCase::new(repo);

        assert!(use_case.get(&owner, &payment.payment_id).await.is_ok());
        assert!(use_case.get(&admin(), &payment.payment_id).await.is_ok());
        assert!(matches!(
            use_case.get(&user(), &payment.payment_id).await,
            Err(PaymentError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_status_for_admins_only() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        seed(&repo, &owner, "1.00", PaymentStatus::Pending, None);
        seed(&repo, &owner, "2.00", PaymentStatus::Completed, Some(Utc::now()));
        let use_case = PaymentQueryUseCase::new(repo);

        assert!(matches!(
            use_case.list(&owner, None).await,
            Err(PaymentError::Forbidden(_))
        ));
        assert_eq!(use_case.list(&admin(), None).await.unwrap().len(), 2);
        let completed = use_case
            .list(&admin(), Some(PaymentStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_revenue_counts_completed_payments_in_window() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let in_march = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let last_second = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let april = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        seed(&repo, &owner, "100.25", PaymentStatus::Completed, Some(in_march));
        seed(&repo, &owner, "50.00", PaymentStatus::Completed, Some(last_second));
        seed(&repo, &owner, "999.00", PaymentStatus::Completed, Some(april));
        // refunded and pending money is not revenue
        seed(&repo, &owner, "70.00", PaymentStatus::Refunded, Some(in_march));
        seed(&repo, &owner, "30.00", PaymentStatus::Pending, None);

        let use_case = PaymentQueryUseCase::new(repo);
        let admin = admin();

        assert_eq!(
            use_case.monthly_revenue(&admin, 2024, 3).await.unwrap(),
            dec("150.25")
        );
        assert_eq!(
            use_case
                .daily_revenue(&admin, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
                .await
                .unwrap(),
            dec("100.25")
        );
        assert_eq!(
            use_case.monthly_revenue(&admin, 2023, 1).await.unwrap(),
            Decimal::ZERO
        );
        assert!(matches!(
            use_case.monthly_revenue(&owner, 2024, 3).await,
            Err(PaymentError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_total_spent_sums_only_completed_payments() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        seed(&repo, &owner, "40.10", PaymentStatus::Completed, Some(Utc::now()));
        seed(&repo, &owner, "9.90", PaymentStatus::Completed, Some(Utc::now()));
        seed(&repo, &owner, "500.00", PaymentStatus::Refunded, Some(Utc::now()));
        seed(&repo, &owner, "25.00", PaymentStatus::Pending, None);
        seed(&repo, &user(), "77.00", PaymentStatus::Completed, Some(Utc::now()));
        let use_case = PaymentQueryUseCase::new(repo);

        assert_eq!(
            use_case.total_spent(&owner, &owner.account_id).await.unwrap(),
            dec("50.00")
        );
        assert_eq!(
            use_case.total_spent(&admin(), &owner.account_id).await.unwrap(),
            dec("50.00")
        );

        let newcomer = user();
        assert_eq!(
            use_case
                .total_spent(&newcomer, &newcomer.account_id)
                .await
                .unwrap(),
            Decimal::ZERO
        );
        assert!(matches!(
            use_case.total_spent(&newcomer, &owner.account_id).await,
            Err(PaymentError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_stats_cover_current_month_and_day() {
        let repo = Arc::new(InMemoryPayments::default());
        let owner = user();
        let now = Utc::now();
        seed(&repo, &owner, "12.34", PaymentStatus::Completed, Some(now));

        let stats = PaymentQueryUseCase::new(repo)
            .stats(&admin())
            .await
            .unwrap();

        assert_eq!(stats.daily_revenue, dec("12.34"));
        // the same payment falls in the current month too
        assert_eq!(stats.monthly_revenue, dec("12.34"));
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::presentation::router::payments_router_generic;

    struct TestApp {
        repo: InMemoryPayments,
        stripe: FakeGateway,
        paypal: FakeGateway,
    }

    impl TestApp {
        fn new() -> Self {
            Self {
                repo: InMemoryPayments::default(),
                stripe: FakeGateway::new(PaymentMethod::Stripe),
                paypal: FakeGateway::new(PaymentMethod::PayPal),
            }
        }

        /// Router as seen by `caller`; `None` means no bearer token
        fn as_caller(&self, caller: Option<&Caller>) -> Router {
            let router = Router::new().nest(
                "/api/payments",
                payments_router_generic(
                    self.repo.clone(),
                    self.stripe.clone(),
                    self.paypal.clone(),
                    PaymentConfig::development(),
                ),
            );
            match caller {
                Some(caller) => router.layer(Extension(caller.clone())),
                None => router,
            }
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn put(uri: &str) -> Request<Body> {
        Request::put(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_stripe_create_confirm_and_read_back() {
        let app = TestApp::new();
        let owner = user();

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            post_json(
                "/api/payments/stripe/create",
                json!({"amount": 499.5, "description": "Keyboard"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["payment"]["status"], "PENDING");
        assert_eq!(body["payment"]["method"], "STRIPE");
        assert_eq!(body["payment"]["amount"], "499.50");
        assert!(body["clientSecret"].is_string());
        assert!(body.get("approvalUrl").is_none());

        let intent_id = body["payment"]["correlationId"].as_str().unwrap().to_string();
        let payment_id = body["payment"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            post_json(
                "/api/payments/stripe/confirm",
                json!({"paymentIntentId": intent_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["status"], "COMPLETED");
        assert!(body["payment"]["completedAt"].is_string());

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            get(&format!("/api/payments/{payment_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["status"], "COMPLETED");

        let (status, _) = send(
            app.as_caller(Some(&user())),
            get(&format!("/api/payments/{payment_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_paypal_confirm_with_declined_capture_fails_payment() {
        let app = TestApp::new();
        let owner = user();
        app.paypal.will_settle(ProviderOutcome::Failed);

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            post_json("/api/payments/paypal/create", json!({"amount": "25.00"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["approvalUrl"].is_string());
        let order_id = body["payment"]["correlationId"].as_str().unwrap().to_string();

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            post_json("/api/payments/paypal/confirm", json!({"orderId": order_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["status"], "FAILED");
    }

    #[tokio::test]
    async fn test_invalid_amount_and_missing_token() {
        let app = TestApp::new();

        let (status, body) = send(
            app.as_caller(Some(&user())),
            post_json("/api/payments/stripe/create", json!({"amount": -3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid payment amount");

        let (status, body) = send(app.as_caller(None), get("/api/payments/history")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_cancel_then_cancel_again_is_bad_request() {
        let app = TestApp::new();
        let owner = user();
        let payment = seed(&app.repo, &owner, "10.00", PaymentStatus::Pending, None);
        let uri = format!("/api/payments/{}/cancel", payment.payment_id);

        let (status, body) = send(app.as_caller(Some(&owner)), put(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["status"], "CANCELLED");

        let (status, body) = send(app.as_caller(Some(&owner)), put(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Payment is CANCELLED, cannot cancel");
    }

    #[tokio::test]
    async fn test_total_spent_defaults_to_caller() {
        let app = TestApp::new();
        let owner = user();
        seed(&app.repo, &owner, "19.99", PaymentStatus::Completed, Some(Utc::now()));
        seed(&app.repo, &owner, "5.00", PaymentStatus::Cancelled, None);

        let (status, body) = send(
            app.as_caller(Some(&owner)),
            get("/api/payments/total-spent"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalSpent"], "19.99");
        assert_eq!(body["accountId"], owner.account_id.to_string());

        let uri = format!("/api/payments/total-spent?accountId={}", owner.account_id);
        let (status, _) = send(app.as_caller(Some(&user())), get(&uri)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(app.as_caller(Some(&admin())), get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalSpent"], "19.99");
    }

    #[tokio::test]
    async fn test_admin_endpoints() {
        let app = TestApp::new();
        let owner = user();
        let completed = seed(&app.repo, &owner, "80.00", PaymentStatus::Completed, Some(Utc::now()));
        seed(&app.repo, &owner, "20.00", PaymentStatus::Pending, None);

        let (status, _) = send(app.as_caller(Some(&owner)), get("/api/payments/all")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            app.as_caller(Some(&admin())),
            get("/api/payments/all?status=PENDING"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);

        let (status, body) = send(app.as_caller(Some(&admin())), get("/api/payments/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dailyRevenue"], "80.00");

        let (status, body) = send(
            app.as_caller(Some(&admin())),
            put(&format!("/api/payments/{}/refund", completed.payment_id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["status"], "REFUNDED");
    }
}
