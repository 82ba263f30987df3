//! Auth Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Auth routes (`/api/auth/...`) backed by PostgreSQL
pub fn auth_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Auth routes for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/signout", post(handlers::sign_out))
        .route("/validate", get(handlers::validate::<R>))
        .route("/me", get(handlers::me::<R>))
        .with_state(state)
}

/// Profile and admin routes (`/api/users/...`) backed by PostgreSQL
pub fn users_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    users_router_generic(repo, config)
}

/// Profile and admin routes for any repository implementation
pub fn users_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route("/change-password", put(handlers::change_password::<R>))
        .route("/deactivate", put(handlers::deactivate_self::<R>))
        .route("/all", get(handlers::list_users::<R>))
        .route("/search", get(handlers::search_users::<R>))
        .route("/stats", get(handlers::user_stats::<R>))
        .route("/{id}", get(handlers::get_user::<R>))
        .route("/{id}/activate", put(handlers::activate_user::<R>))
        .route("/{id}/deactivate", put(handlers::deactivate_user::<R>))
        .route("/{id}/role", put(handlers::set_user_role::<R>))
        .with_state(state)
}
