//! Infrastructure Layer
//!
//! PostgreSQL ledger and provider HTTP clients.

pub mod paypal;
pub mod postgres;
pub mod stripe;

use std::time::Duration;

use crate::error::PaymentError;

/// Failure talking to a provider's REST API
#[derive(Debug, thiserror::Error)]
pub(crate) enum ProviderHttpError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderHttpError {
    pub(crate) fn into_payment_error(self, provider: &'static str) -> PaymentError {
        PaymentError::provider(provider, self.to_string())
    }
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, PaymentError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PaymentError::Internal(format!("HTTP client: {e}")))
}

/// Read the body, turning non-2xx answers into `Api` errors.
///
/// `extract_message` pulls the provider's human-readable message out of an
/// error body; the raw body is used when it finds none.
pub(crate) async fn read_json<T>(
    resp: reqwest::Response,
    extract_message: fn(&serde_json::Value) -> Option<String>,
) -> Result<T, ProviderHttpError>
where
    T: serde::de::DeserializeOwned,
{
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(extract_message)
            .unwrap_or(body);
        return Err(ProviderHttpError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<T>(&body)
        .map_err(|e| ProviderHttpError::InvalidResponse(format!("{e}; body={body}")))
}
