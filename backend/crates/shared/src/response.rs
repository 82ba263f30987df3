//! Response envelope
//!
//! Successful bodies look like
//! `{"success": true, "message": "...", "timestamp": "...", ...data}`;
//! failures are rendered by `AppError` with `success: false`.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Success envelope. `data` is flattened into the top-level object, so it
/// must serialize as a map (a struct or `serde_json::Map`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    success: bool,
    message: Cow<'static, str>,
    #[serde(flatten)]
    data: T,
    timestamp: DateTime<Utc>,
    #[serde(skip)]
    status: u16,
}

/// Payload for responses that carry only the envelope.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            timestamp: Utc::now(),
            status: 200,
        }
    }

    pub fn created(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            status: 201,
            ..Self::ok(message, data)
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ok(message, Empty {})
    }
}

#[cfg(feature = "axum")]
mod http_impl {
    use axum::extract::rejection::JsonRejection;
    use axum::extract::{FromRequest, Request};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use super::ApiResponse;
    use crate::error::app_error::AppError;

    impl<T: Serialize> IntoResponse for ApiResponse<T> {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
            (status, axum::Json(self)).into_response()
        }
    }

    /// `axum::Json` whose rejection is rendered as the error envelope.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ApiJson<T>(pub T);

    impl<T, S> FromRequest<S> for ApiJson<T>
    where
        axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
        S: Send + Sync,
    {
        type Rejection = AppError;

        async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
            let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

#[cfg(feature = "axum")]
pub use http_impl::ApiJson;
