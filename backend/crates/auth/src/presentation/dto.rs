//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::access::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountCounts;

// ============================================================================
// Sign Up / Sign In
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Returned by sign up and sign in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    pub user: AccountResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: AccountResponse,
}

/// 401 body of `/auth/validate`: the error envelope plus `valid: false`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidTokenResponse {
    pub success: bool,
    pub valid: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl InvalidTokenResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            valid: false,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.into_uuid(),
            email: account.email.as_str().to_string(),
            full_name: account.full_name.as_str().to_string(),
            avatar_url: account.avatar_url.as_ref().map(|u| u.as_str().to_string()),
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub user: AccountResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersEnvelope {
    pub users: Vec<AccountResponse>,
    pub count: usize,
}

impl From<Vec<Account>> for UsersEnvelope {
    fn from(accounts: Vec<Account>) -> Self {
        let users: Vec<AccountResponse> = accounts.iter().map(AccountResponse::from).collect();
        Self {
            count: users.len(),
            users,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatsResponse {
    pub total_accounts: i64,
    pub active_accounts: i64,
}

impl From<AccountCounts> for AccountStatsResponse {
    fn from(counts: AccountCounts) -> Self {
        Self {
            total_accounts: counts.total,
            active_accounts: counts.active,
        }
    }
}
