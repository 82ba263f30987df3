//! PayPal Orders v2 client
//!
//! Opens an order with intent `CAPTURE` and captures it on confirmation.
//! Calls are authorized with an OAuth2 client-credentials token, cached
//! until shortly before it expires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::config::{PayPalSettings, PaymentConfig};
use crate::domain::entity::payment::Payment;
use crate::domain::gateway::{Checkout, PaymentGateway, ProviderOutcome};
use crate::domain::value_object::PaymentMethod;
use crate::error::{PaymentError, PaymentResult};
use crate::infra::{ProviderHttpError, http_client, read_json};

const PROVIDER: &str = "PayPal";

/// Refresh the token this long before PayPal would expire it
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct PayPalClient {
    http: reqwest::Client,
    settings: Option<PayPalSettings>,
    brand_name: String,
    return_url: String,
    cancel_url: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest<'a> {
    intent: &'static str,
    purchase_units: [PurchaseUnit<'a>; 1],
    application_context: ApplicationContext<'a>,
}

#[derive(Debug, Serialize)]
struct PurchaseUnit<'a> {
    reference_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    amount: Money,
}

#[derive(Debug, Serialize)]
struct Money {
    currency_code: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ApplicationContext<'a> {
    brand_name: &'a str,
    landing_page: &'static str,
    user_action: &'static str,
    return_url: &'a str,
    cancel_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct Order {
    id: String,
    status: String,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
    rel: String,
}

impl Order {
    fn approval_url(&self) -> Option<String> {
        self.links
            .iter()
            .find(|link| link.rel == "approve" || link.rel == "payer-action")
            .map(|link| link.href.clone())
    }
}

impl PayPalClient {
    pub fn new(config: &PaymentConfig) -> PaymentResult<Self> {
        match &config.paypal {
            Some(settings) => tracing::info!(
                environment = ?settings.environment,
                "PayPal client configured"
            ),
            None => tracing::warn!("PayPal credentials not set; PayPal payments are disabled"),
        }
        Ok(Self {
            http: http_client(config.provider_timeout)?,
            settings: config.paypal.clone(),
            brand_name: config.brand_name.clone(),
            return_url: config.return_url.clone(),
            cancel_url: config.cancel_url.clone(),
            token: Arc::new(Mutex::new(None)),
        })
    }

    fn settings(&self) -> PaymentResult<&PayPalSettings> {
        self.settings
            .as_ref()
            .ok_or(PaymentError::ProviderUnavailable(PROVIDER))
    }

    async fn access_token(&self, settings: &PayPalSettings) -> Result<String, ProviderHttpError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        let resp = self
            .http
            .post(format!("{}/v1/oauth2/token", settings.api_base()))
            .basic_auth(&settings.client_id, Some(&settings.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: TokenResponse = read_json(resp, paypal_error_message).await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn order_request<'a>(&'a self, payment: &'a Payment) -> CreateOrderRequest<'a> {
        CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: [PurchaseUnit {
                reference_id: payment.transaction_id.as_str(),
                description: payment.description.as_deref(),
                amount: Money {
                    currency_code: payment.currency.to_ascii_uppercase(),
                    value: payment.amount.to_string(),
                },
            }],
            application_context: ApplicationContext {
                brand_name: &self.brand_name,
                landing_page: "BILLING",
                user_action: "PAY_NOW",
                return_url: &self.return_url,
                cancel_url: &self.cancel_url,
            },
        }
    }

    async fn create_order(
        &self,
        settings: &PayPalSettings,
        payment: &Payment,
    ) -> Result<Order, ProviderHttpError> {
        let token = self.access_token(settings).await?;
        let resp = self
            .http
            .post(format!("{}/v2/checkout/orders", settings.api_base()))
            .bearer_auth(token)
            .header("PayPal-Request-Id", payment.transaction_id.as_str())
            .json(&self.order_request(payment))
            .send()
            .await?;

        read_json(resp, paypal_error_message).await
    }

    async fn capture_order(
        &self,
        settings: &PayPalSettings,
        order_id: &str,
    ) -> Result<Order, ProviderHttpError> {
        let token = self.access_token(settings).await?;
        let resp = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{}/capture",
                settings.api_base(),
                order_id
            ))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        read_json(resp, paypal_error_message).await
    }
}

/// `{"name": "...", "message": "...", "details": [{"description": "..."}]}`
fn paypal_error_message(body: &serde_json::Value) -> Option<String> {
    let detail = body
        .get("details")
        .and_then(|d| d.get(0))
        .and_then(|d| d.get("description"))
        .and_then(|d| d.as_str());

    match (body.get("message").and_then(|m| m.as_str()), detail) {
        (Some(message), Some(detail)) => Some(format!("{message} {detail}")),
        (Some(message), None) => Some(message.to_owned()),
        (None, Some(detail)) => Some(detail.to_owned()),
        (None, None) => body
            .get("error_description")
            .and_then(|m| m.as_str())
            .map(str::to_owned),
    }
}

impl PaymentGateway for PayPalClient {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    async fn open(&self, payment: &Payment) -> PaymentResult<Checkout> {
        let settings = self.settings()?;
        let order = self
            .create_order(settings, payment)
            .await
            .map_err(|e| e.into_payment_error(PROVIDER))?;

        tracing::debug!(
            payment_id = %payment.payment_id,
            order_id = %order.id,
            status = %order.status,
            "PayPal order created"
        );

        Ok(Checkout {
            approval_url: order.approval_url(),
            correlation_id: order.id,
            client_secret: None,
        })
    }

    async fn settle(&self, correlation_id: &str) -> PaymentResult<ProviderOutcome> {
        let settings = self.settings()?;
        let order = self
            .capture_order(settings, correlation_id)
            .await
            .map_err(|e| e.into_payment_error(PROVIDER))?;

        Ok(ProviderOutcome::from_paypal_capture_status(&order.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{AccountId, Amount};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn client() -> PayPalClient {
        PayPalClient::new(&PaymentConfig::development()).unwrap()
    }

    #[test]
    fn test_order_request_shape() {
        let payment = Payment::new(
            AccountId::new(),
            Amount::new(Decimal::new(49950, 2)).unwrap(),
            "INR",
            PaymentMethod::PayPal,
            Some("Headphones".to_string()),
        );
        let client = client();
        let body = serde_json::to_value(client.order_request(&payment)).unwrap();

        assert_eq!(body["intent"], "CAPTURE");
        let unit = &body["purchase_units"][0];
        assert_eq!(unit["reference_id"], payment.transaction_id.as_str());
        assert_eq!(unit["description"], "Headphones");
        assert_eq!(unit["amount"]["currency_code"], "INR");
        assert_eq!(unit["amount"]["value"], "499.50");
        assert_eq!(body["application_context"]["brand_name"], "Sanekey Store");
        assert_eq!(body["application_context"]["user_action"], "PAY_NOW");
        assert_eq!(
            body["application_context"]["return_url"],
            "http://localhost:3000/payment/success"
        );
    }

    #[test]
    fn test_approval_link_is_found() {
        let order: Order = serde_json::from_value(json!({
            "id": "5O190127TN364715T",
            "status": "CREATED",
            "links": [
                {"href": "https://api.paypal.com/v2/checkout/orders/5O1", "rel": "self", "method": "GET"},
                {"href": "https://www.paypal.com/checkoutnow?token=5O1", "rel": "approve", "method": "GET"}
            ]
        }))
        .unwrap();

        assert_eq!(
            order.approval_url().as_deref(),
            Some("https://www.paypal.com/checkoutnow?token=5O1")
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let body = json!({
            "name": "UNPROCESSABLE_ENTITY",
            "message": "The requested action could not be performed.",
            "details": [{"issue": "ORDER_NOT_APPROVED", "description": "Payer has not yet approved the Order for payment."}]
        });
        assert_eq!(
            paypal_error_message(&body).as_deref(),
            Some("The requested action could not be performed. Payer has not yet approved the Order for payment.")
        );

        let oauth = json!({"error": "invalid_client", "error_description": "Client Authentication failed"});
        assert_eq!(
            paypal_error_message(&oauth).as_deref(),
            Some("Client Authentication failed")
        );
    }

    #[test]
    fn test_unconfigured_client() {
        assert!(!client().is_configured());
    }
}
