//! Payment Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::access::AccessDenied;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::PaymentStatus;

pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Payment not found")]
    NotFound,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The stored status does not allow the requested transition
    #[error("Payment is {current}, cannot {attempted}")]
    InvalidState {
        current: PaymentStatus,
        attempted: &'static str,
    },

    /// The provider rejected or failed the call; its message is surfaced
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("{0} is not configured")]
    ProviderUnavailable(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::InvalidInput(_)
            | PaymentError::InvalidState { .. }
            | PaymentError::Provider { .. } => StatusCode::BAD_REQUEST,
            PaymentError::NotFound => StatusCode::NOT_FOUND,
            PaymentError::Forbidden(_) => StatusCode::FORBIDDEN,
            PaymentError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::Database(_) | PaymentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::InvalidInput(_)
            | PaymentError::InvalidState { .. }
            | PaymentError::Provider { .. } => ErrorKind::BadRequest,
            PaymentError::NotFound => ErrorKind::NotFound,
            PaymentError::Forbidden(_) => ErrorKind::Forbidden,
            PaymentError::ProviderUnavailable(_) => ErrorKind::ServiceUnavailable,
            PaymentError::Database(_) | PaymentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    pub(crate) fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        PaymentError::Provider {
            provider,
            message: message.into(),
        }
    }

    fn log(&self) {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "Payment database error");
            }
            PaymentError::Internal(msg) => {
                tracing::error!(message = %msg, "Payment internal error");
            }
            PaymentError::Provider { provider, message } => {
                tracing::warn!(provider, message = %message, "Payment provider error");
            }
            PaymentError::ProviderUnavailable(provider) => {
                tracing::warn!(provider, "Payment provider not configured");
            }
            PaymentError::Forbidden(denied) => {
                tracing::warn!(action = denied.action.as_str(), "Payment access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Payment error");
            }
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::access::Action;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PaymentError::InvalidState {
                current: PaymentStatus::Completed,
                attempted: "cancel",
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PaymentError::provider("Stripe", "card declined").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PaymentError::from(AccessDenied {
                action: Action::Refund
            })
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PaymentError::ProviderUnavailable("PayPal").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_provider_message_is_surfaced() {
        let err = PaymentError::provider("Stripe", "Your card was declined.");
        assert_eq!(err.to_app_error().public_message(), "Stripe error: Your card was declined.");
    }

    #[test]
    fn test_invalid_state_message() {
        let err = PaymentError::InvalidState {
            current: PaymentStatus::Pending,
            attempted: "refund",
        };
        assert_eq!(err.to_string(), "Payment is PENDING, cannot refund");
    }
}
