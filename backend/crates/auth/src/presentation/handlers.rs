//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::access::Caller;
use kernel::response::{ApiJson, ApiResponse, Empty};
use platform::client::extract_bearer_token;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    AccountAdminUseCase, ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase,
    ProfileUseCase, Session, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    UpdateProfileInput,
};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, AccountStatsResponse, AuthResponse, ChangePasswordRequest,
    InvalidTokenResponse, ListUsersQuery, SearchUsersQuery, SetRoleRequest, SignInRequest,
    SignUpRequest, UpdateProfileRequest, UserEnvelope, UsersEnvelope, ValidateResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        user: AccountResponse::from(&session.account),
        token: session.token,
        token_type: "Bearer",
    }
}

fn user_envelope(account: &crate::domain::Account) -> UserEnvelope {
    UserEnvelope {
        user: AccountResponse::from(account),
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        auth_response(session),
    ))
}

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok("Login successful", auth_response(session)))
}

/// POST /api/auth/signout
///
/// Tokens are stateless; the client discards its copy.
pub async fn sign_out() -> ApiResponse<Empty> {
    ApiResponse::message("Logout successful")
}

/// GET /api/auth/validate
///
/// An unusable token answers 401 with `valid: false` in the body.
pub async fn validate<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let checked = match extract_bearer_token(&headers) {
        Some(token) => {
            CheckSessionUseCase::new(state.repo.clone(), state.config.clone())
                .execute(token)
                .await
        }
        None => Err(AuthError::SessionInvalid),
    };

    match checked {
        Ok(account) => ApiResponse::ok(
            "Token is valid",
            ValidateResponse {
                valid: true,
                user: AccountResponse::from(&account),
            },
        )
        .into_response(),
        Err(e) if e.status_code() == StatusCode::UNAUTHORIZED => {
            tracing::debug!(error = %e, "Token validation failed");
            let body = InvalidTokenResponse::new(e.to_app_error().public_message());
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = ProfileUseCase::new(state.repo.clone()).get(&caller).await?;
    Ok(ApiResponse::ok("Current user", user_envelope(&account)))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/users/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = ProfileUseCase::new(state.repo.clone()).get(&caller).await?;
    Ok(ApiResponse::ok("Profile retrieved", user_envelope(&account)))
}

/// PUT /api/users/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = ProfileUseCase::new(state.repo.clone())
        .update(
            &caller,
            UpdateProfileInput {
                full_name: req.full_name,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(ApiResponse::ok(
        "Profile updated successfully",
        user_envelope(&account),
    ))
}

/// PUT /api/users/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> AuthResult<ApiResponse<Empty>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &caller,
            ChangePasswordInput {
                old_password: req.old_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(ApiResponse::message("Password changed successfully"))
}

/// PUT /api/users/deactivate
pub async fn deactivate_self<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<ApiResponse<Empty>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    ProfileUseCase::new(state.repo.clone())
        .deactivate(&caller)
        .await?;

    Ok(ApiResponse::message("Account deactivated successfully"))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/users/all
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Query(query): Query<ListUsersQuery>,
) -> AuthResult<ApiResponse<UsersEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let accounts = AccountAdminUseCase::new(state.repo.clone())
        .list(&caller, query.active_only)
        .await?;

    Ok(ApiResponse::ok("Users retrieved", accounts.into()))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = AccountAdminUseCase::new(state.repo.clone())
        .get(&caller, &AccountId::from_uuid(id))
        .await?;

    Ok(ApiResponse::ok("User retrieved", user_envelope(&account)))
}

/// GET /api/users/search?name=
pub async fn search_users<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Query(query): Query<SearchUsersQuery>,
) -> AuthResult<ApiResponse<UsersEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let accounts = AccountAdminUseCase::new(state.repo.clone())
        .search(&caller, &query.name)
        .await?;

    Ok(ApiResponse::ok("Search completed", accounts.into()))
}

/// GET /api/users/stats
pub async fn user_stats<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<ApiResponse<AccountStatsResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let counts = AccountAdminUseCase::new(state.repo.clone())
        .stats(&caller)
        .await?;

    Ok(ApiResponse::ok("User statistics", counts.into()))
}

/// PUT /api/users/{id}/activate
pub async fn activate_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = AccountAdminUseCase::new(state.repo.clone())
        .set_active(&caller, &AccountId::from_uuid(id), true)
        .await?;

    Ok(ApiResponse::ok("User activated", user_envelope(&account)))
}

/// PUT /api/users/{id}/deactivate
pub async fn deactivate_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = AccountAdminUseCase::new(state.repo.clone())
        .set_active(&caller, &AccountId::from_uuid(id), false)
        .await?;

    Ok(ApiResponse::ok("User deactivated", user_envelope(&account)))
}

/// PUT /api/users/{id}/role
pub async fn set_user_role<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<SetRoleRequest>,
) -> AuthResult<ApiResponse<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = AccountAdminUseCase::new(state.repo.clone())
        .set_role(&caller, &AccountId::from_uuid(id), req.role)
        .await?;

    Ok(ApiResponse::ok("User role updated", user_envelope(&account)))
}
