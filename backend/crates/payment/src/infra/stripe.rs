//! Stripe Payment Intents client
//!
//! `POST /v1/payment_intents` to open, `GET /v1/payment_intents/{id}` to settle.
//! Authenticated with the secret key as a bearer token; bodies are form-encoded.

use serde::Deserialize;

use crate::application::config::{PaymentConfig, StripeSettings};
use crate::domain::entity::payment::Payment;
use crate::domain::gateway::{Checkout, PaymentGateway, ProviderOutcome};
use crate::domain::value_object::PaymentMethod;
use crate::error::{PaymentError, PaymentResult};
use crate::infra::{ProviderHttpError, http_client, read_json};

const PROVIDER: &str = "Stripe";

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    settings: Option<StripeSettings>,
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    id: String,
    status: String,
    client_secret: Option<String>,
}

impl StripeClient {
    pub fn new(config: &PaymentConfig) -> PaymentResult<Self> {
        if config.stripe.is_none() {
            tracing::warn!("Stripe secret key not set; Stripe payments are disabled");
        }
        Ok(Self {
            http: http_client(config.provider_timeout)?,
            settings: config.stripe.clone(),
        })
    }

    fn settings(&self) -> PaymentResult<&StripeSettings> {
        self.settings
            .as_ref()
            .ok_or(PaymentError::ProviderUnavailable(PROVIDER))
    }

    async fn create_intent(
        &self,
        settings: &StripeSettings,
        payment: &Payment,
        amount: i64,
    ) -> Result<PaymentIntent, ProviderHttpError> {
        let mut form: Vec<(&str, String)> = vec![
            ("amount", amount.to_string()),
            ("currency", payment.currency.to_ascii_lowercase()),
            ("metadata[account_id]", payment.account_id.to_string()),
            ("metadata[payment_id]", payment.payment_id.to_string()),
            ("metadata[transaction_id]", payment.transaction_id.to_string()),
        ];
        if let Some(description) = &payment.description {
            form.push(("description", description.clone()));
        }

        let resp = self
            .http
            .post(format!("{}/v1/payment_intents", settings.api_base))
            .bearer_auth(&settings.secret_key)
            .header("Idempotency-Key", payment.transaction_id.as_str())
            .form(&form)
            .send()
            .await?;

        read_json(resp, stripe_error_message).await
    }

    async fn retrieve_intent(
        &self,
        settings: &StripeSettings,
        intent_id: &str,
    ) -> Result<PaymentIntent, ProviderHttpError> {
        let resp = self
            .http
            .get(format!("{}/v1/payment_intents/{}", settings.api_base, intent_id))
            .bearer_auth(&settings.secret_key)
            .send()
            .await?;

        read_json(resp, stripe_error_message).await
    }
}

/// `{"error": {"message": "..."}}`
fn stripe_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

impl PaymentGateway for StripeClient {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Stripe
    }

    fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    async fn open(&self, payment: &Payment) -> PaymentResult<Checkout> {
        let settings = self.settings()?;
        let amount = payment.amount.minor_units()?;
        let intent = self
            .create_intent(settings, payment, amount)
            .await
            .map_err(|e| e.into_payment_error(PROVIDER))?;

        tracing::debug!(
            payment_id = %payment.payment_id,
            intent_id = %intent.id,
            status = %intent.status,
            "Stripe payment intent created"
        );

        Ok(Checkout {
            correlation_id: intent.id,
            client_secret: intent.client_secret,
            approval_url: None,
        })
    }

    async fn settle(&self, correlation_id: &str) -> PaymentResult<ProviderOutcome> {
        let settings = self.settings()?;
        let intent = self
            .retrieve_intent(settings, correlation_id)
            .await
            .map_err(|e| e.into_payment_error(PROVIDER))?;

        Ok(ProviderOutcome::from_stripe_status(&intent.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_extraction() {
        let body = json!({"error": {"message": "Your card was declined.", "type": "card_error"}});
        assert_eq!(
            stripe_error_message(&body).as_deref(),
            Some("Your card was declined.")
        );
        assert_eq!(stripe_error_message(&json!({"oops": true})), None);
    }

    #[test]
    fn test_unconfigured_client() {
        let client = StripeClient::new(&PaymentConfig::development()).unwrap();
        assert!(!client.is_configured());
        assert!(matches!(
            client.settings(),
            Err(PaymentError::ProviderUnavailable("Stripe"))
        ));
    }

    #[test]
    fn test_intent_deserializes_without_secret() {
        let intent: PaymentIntent =
            serde_json::from_value(json!({"id": "pi_1", "status": "succeeded", "amount": 100}))
                .unwrap();
        assert_eq!(intent.id, "pi_1");
        assert!(intent.client_secret.is_none());
    }
}
