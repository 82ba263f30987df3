//! Auth Middleware
//!
//! Resolves the bearer token into a [`Caller`] stored in request extensions.
//! Handlers that require authentication take `Caller` as an extractor, which
//! rejects with 401 when the middleware stored nothing.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::access::Caller;
use platform::client::extract_bearer_token;
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Attach the caller when a valid token is presented.
///
/// An absent or invalid token is not an error here: public routes still
/// work, and protected routes reject through the `Caller` extractor.
pub async fn resolve_caller<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    // Never trust a Caller that did not come from this middleware
    req.extensions_mut().remove::<Caller>();

    if let Some(token) = extract_bearer_token(req.headers()).map(str::to_owned) {
        let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
        match use_case.caller(&token).await {
            Ok(caller) => {
                req.extensions_mut().insert(caller);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
            }
        }
    }

    next.run(req).await
}
