//! Account Administration Use Case
//!
//! Every operation requires the ADMIN role.

use std::sync::Arc;

use kernel::access::{Action, Caller, Role, authorize};

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountCounts, AccountRepository};
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

const SEARCH_TERM_MAX_LENGTH: usize = 100;

pub struct AccountAdminUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> AccountAdminUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn list(&self, caller: &Caller, active_only: bool) -> AuthResult<Vec<Account>> {
        authorize(caller, None, Action::Administer)?;
        self.account_repo.list(active_only).await
    }

    pub async fn get(&self, caller: &Caller, account_id: &AccountId) -> AuthResult<Account> {
        authorize(caller, None, Action::Administer)?;
        self.account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    pub async fn search(&self, caller: &Caller, name: &str) -> AuthResult<Vec<Account>> {
        authorize(caller, None, Action::Administer)?;

        let term = name.trim();
        if term.is_empty() || term.chars().count() > SEARCH_TERM_MAX_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "Search term must be 1 to {} characters",
                SEARCH_TERM_MAX_LENGTH
            )));
        }
        self.account_repo.search_by_name(term).await
    }

    pub async fn stats(&self, caller: &Caller) -> AuthResult<AccountCounts> {
        authorize(caller, None, Action::Administer)?;
        self.account_repo.counts().await
    }

    pub async fn set_active(
        &self,
        caller: &Caller,
        account_id: &AccountId,
        is_active: bool,
    ) -> AuthResult<Account> {
        let mut account = self.get(caller, account_id).await?;
        account.set_active(is_active);
        self.account_repo.update(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            admin_id = %caller.account_id,
            is_active,
            "Account activation changed"
        );
        Ok(account)
    }

    pub async fn set_role(
        &self,
        caller: &Caller,
        account_id: &AccountId,
        role: Role,
    ) -> AuthResult<Account> {
        let mut account = self.get(caller, account_id).await?;
        account.set_role(role);
        self.account_repo.update(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            admin_id = %caller.account_id,
            role = %role,
            "Account role changed"
        );
        Ok(account)
    }
}
