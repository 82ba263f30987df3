//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{AccountId, email::Email};
use crate::error::AuthResult;

/// Totals reported by the admin statistics endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountCounts {
    pub total: i64,
    pub active: i64,
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; a duplicate email yields `AuthError::EmailTaken`
    async fn create(&self, account: &Account) -> AuthResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist profile, password, role and active flag
    async fn update(&self, account: &Account) -> AuthResult<()>;

    /// All accounts, newest first
    async fn list(&self, active_only: bool) -> AuthResult<Vec<Account>>;

    /// Case-insensitive substring match on full name
    async fn search_by_name(&self, term: &str) -> AuthResult<Vec<Account>>;

    async fn counts(&self) -> AuthResult<AccountCounts>;
}
