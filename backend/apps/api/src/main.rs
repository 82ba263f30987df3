//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::{
    AuthConfig, AuthMiddlewareState, PgAccountRepository, auth_router, resolve_caller,
    users_router,
};
use axum::extract::State;
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use kernel::response::ApiResponse;
use payment::{PayPalClient, PaymentConfig, PgPaymentRepository, StripeClient, payments_router};
use review::{PgReviewRepository, ReviewConfig, reviews_router};
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,payment=info,review=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = auth_config()?;
    tracing::info!(config = ?auth_config, "Auth configured");

    let payment_config = PaymentConfig::from_env()?;
    let stripe = StripeClient::new(&payment_config)?;
    let paypal = PayPalClient::new(&payment_config)?;

    let accounts = PgAccountRepository::new(pool.clone());
    let caller_state = AuthMiddlewareState {
        repo: Arc::new(accounts.clone()),
        config: Arc::new(auth_config.clone()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(accounts.clone(), auth_config.clone()))
        .nest("/api/users", users_router(accounts, auth_config))
        .nest(
            "/api/payments",
            payments_router(
                PgPaymentRepository::new(pool.clone()),
                stripe,
                paypal,
                payment_config,
            ),
        )
        .nest(
            "/api/reviews",
            reviews_router(PgReviewRepository::new(pool.clone()), ReviewConfig::default()),
        )
        .route("/api/health", get(health).with_state(pool))
        .layer(middleware::from_fn_with_state(
            caller_state,
            resolve_caller::<PgAccountRepository>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid BIND_ADDR: {bind_addr}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    auth_config_from(
        |key| env::var(key).ok().filter(|v| !v.trim().is_empty()),
        cfg!(debug_assertions),
    )
}

/// Token settings: `JWT_SECRET` when set, otherwise a random secret in debug
/// builds. Release builds refuse to start without it.
fn auth_config_from(
    lookup: impl Fn(&str) -> Option<String>,
    allow_random_secret: bool,
) -> anyhow::Result<AuthConfig> {
    let mut config = match lookup("JWT_SECRET") {
        Some(secret_b64) => AuthConfig {
            token_secret: platform::crypto::decode_secret(&secret_b64)
                .context("JWT_SECRET is invalid")?,
            ..AuthConfig::default()
        },
        None if allow_random_secret => {
            tracing::warn!("JWT_SECRET not set, signing tokens with a random secret");
            AuthConfig::development()
        }
        None => anyhow::bail!("JWT_SECRET must be set in production"),
    };

    if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
        config.token_ttl = token_ttl(&hours)?;
    }

    if let Some(pepper) = lookup("PASSWORD_PEPPER") {
        let pepper = platform::crypto::decode_secret(&pepper).context("PASSWORD_PEPPER is invalid")?;
        config.password_pepper = Some(pepper);
    }

    Ok(config)
}

fn token_ttl(hours: &str) -> anyhow::Result<Duration> {
    let hours: u64 = hours
        .trim()
        .parse()
        .context("TOKEN_TTL_HOURS must be a whole number of hours")?;
    let secs = hours
        .checked_mul(3600)
        .with_context(|| format!("TOKEN_TTL_HOURS is too large: {hours}"))?;
    Ok(Duration::from_secs(secs))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
}

/// GET /api/health
async fn health(State(pool): State<PgPool>) -> ApiResponse<Health> {
    let database = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            "down"
        }
    };

    ApiResponse::ok(
        "Service is running",
        Health {
            status: "UP",
            database,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_token_ttl_hours() {
        assert_eq!(token_ttl("24").unwrap(), Duration::from_secs(86_400));
        assert_eq!(token_ttl(" 1 ").unwrap(), Duration::from_secs(3_600));
        assert!(token_ttl("1.5").is_err());
        assert!(token_ttl(&u64::MAX.to_string()).is_err());
    }

    #[test]
    fn test_jwt_secret_is_used_when_set() {
        let secret = vec![7u8; platform::crypto::MIN_SECRET_LENGTH];
        let encoded = platform::crypto::to_base64(&secret);

        let config = auth_config_from(lookup_from(&[("JWT_SECRET", &encoded)]), true).unwrap();
        assert_eq!(config.token_secret, secret);
    }

    #[test]
    fn test_missing_jwt_secret() {
        assert!(auth_config_from(lookup_from(&[]), false).is_err());

        let config = auth_config_from(lookup_from(&[]), true).unwrap();
        assert_eq!(
            config.token_secret.len(),
            platform::crypto::MIN_SECRET_LENGTH
        );
    }

    #[test]
    fn test_invalid_settings_fail_startup() {
        assert!(auth_config_from(lookup_from(&[("JWT_SECRET", "c2hvcnQ=")]), true).is_err());
        assert!(
            auth_config_from(lookup_from(&[("TOKEN_TTL_HOURS", "99999999999999999")]), true)
                .is_err()
        );
    }
}
