//! Application Configuration
//!
//! Currency, provider credentials and checkout URLs. A provider whose
//! credentials are absent is left unconfigured and its endpoints answer 503.

use std::fmt;
use std::time::Duration;

use crate::error::{PaymentError, PaymentResult};

/// Payment application configuration
#[derive(Clone)]
pub struct PaymentConfig {
    /// ISO 4217 currency for every checkout
    pub currency: String,
    pub stripe: Option<StripeSettings>,
    pub paypal: Option<PayPalSettings>,
    /// Brand shown on the PayPal approval page
    pub brand_name: String,
    pub return_url: String,
    pub cancel_url: String,
    /// Per-request timeout for provider calls
    pub provider_timeout: Duration,
}

#[derive(Clone)]
pub struct StripeSettings {
    pub secret_key: String,
    pub api_base: String,
}

impl StripeSettings {
    pub const DEFAULT_API_BASE: &'static str = "https://api.stripe.com";

    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    /// `live` selects production; anything else is sandbox
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("live") {
            PayPalEnvironment::Live
        } else {
            PayPalEnvironment::Sandbox
        }
    }

    pub const fn api_base(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "https://api-m.sandbox.paypal.com",
            PayPalEnvironment::Live => "https://api-m.paypal.com",
        }
    }
}

#[derive(Clone)]
pub struct PayPalSettings {
    pub client_id: String,
    pub client_secret: String,
    pub environment: PayPalEnvironment,
    /// Overrides the environment's base URL
    pub api_base: Option<String>,
}

impl PayPalSettings {
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.environment.api_base())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            stripe: None,
            paypal: None,
            brand_name: "Sanekey Store".to_string(),
            return_url: "http://localhost:3000/payment/success".to_string(),
            cancel_url: "http://localhost:3000/payment/cancel".to_string(),
            provider_timeout: Duration::from_secs(30),
        }
    }
}

impl PaymentConfig {
    /// Defaults with no provider configured
    pub fn development() -> Self {
        Self::default()
    }

    /// Read `PAYMENT_CURRENCY`, `STRIPE_SECRET_KEY`, `PAYPAL_CLIENT_ID`,
    /// `PAYPAL_CLIENT_SECRET`, `PAYPAL_ENVIRONMENT`, `PAYMENT_RETURN_URL`,
    /// `PAYMENT_CANCEL_URL` and `PAYMENT_PROVIDER_TIMEOUT_SECS`.
    ///
    /// Fails when `PAYMENT_CURRENCY` is not a three-letter code.
    pub fn from_env() -> PaymentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PaymentResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let stripe = get("STRIPE_SECRET_KEY").map(|key| StripeSettings {
            secret_key: key,
            api_base: get("STRIPE_API_BASE")
                .unwrap_or_else(|| StripeSettings::DEFAULT_API_BASE.to_string()),
        });

        let paypal = match (get("PAYPAL_CLIENT_ID"), get("PAYPAL_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(PayPalSettings {
                client_id,
                client_secret,
                environment: get("PAYPAL_ENVIRONMENT")
                    .map(|name| PayPalEnvironment::from_name(&name))
                    .unwrap_or_default(),
                api_base: get("PAYPAL_API_BASE"),
            }),
            _ => None,
        };

        let currency = match get("PAYMENT_CURRENCY") {
            Some(code) => currency_code(&code)?,
            None => defaults.currency,
        };

        Ok(Self {
            currency,
            stripe,
            paypal,
            brand_name: get("PAYMENT_BRAND_NAME").unwrap_or(defaults.brand_name),
            return_url: get("PAYMENT_RETURN_URL").unwrap_or(defaults.return_url),
            cancel_url: get("PAYMENT_CANCEL_URL").unwrap_or(defaults.cancel_url),
            provider_timeout: get("PAYMENT_PROVIDER_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
        })
    }
}

/// Normalize an ISO 4217 code to upper case
fn currency_code(raw: &str) -> PaymentResult<String> {
    let code = raw.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(PaymentError::InvalidInput(format!(
            "PAYMENT_CURRENCY must be a three-letter code, got {code:?}"
        )))
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("currency", &self.currency)
            .field("stripe", &self.stripe.as_ref().map(|_| "[REDACTED]"))
            .field(
                "paypal",
                &self.paypal.as_ref().map(|p| (p.environment, "[REDACTED]")),
            )
            .field("brand_name", &self.brand_name)
            .field("return_url", &self.return_url)
            .field("cancel_url", &self.cancel_url)
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}
