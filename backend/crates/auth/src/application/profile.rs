//! Profile Use Cases
//!
//! Self-service operations on the caller's own account.

use std::sync::Arc;

use kernel::access::{Action, Caller, authorize};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{avatar_url::AvatarUrl, full_name::FullName};
use crate::error::{AuthError, AuthResult};

pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct ProfileUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> ProfileUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    async fn load(&self, caller: &Caller, action: Action) -> AuthResult<Account> {
        let account = self
            .account_repo
            .find_by_id(&caller.account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        authorize(caller, Some(&account.account_id), action)?;
        Ok(account)
    }

    pub async fn get(&self, caller: &Caller) -> AuthResult<Account> {
        self.load(caller, Action::Read).await
    }

    pub async fn update(&self, caller: &Caller, input: UpdateProfileInput) -> AuthResult<Account> {
        let full_name = input.full_name.map(FullName::new).transpose()?;
        let avatar_url = input.avatar_url.map(AvatarUrl::new).transpose()?;

        let mut account = self.load(caller, Action::Edit).await?;
        account.update_profile(full_name, avatar_url);
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");
        Ok(account)
    }

    /// Soft-deactivates the caller's account; existing tokens stop resolving.
    pub async fn deactivate(&self, caller: &Caller) -> AuthResult<()> {
        let mut account = self.load(caller, Action::Edit).await?;
        account.set_active(false);
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Account deactivated by owner");
        Ok(())
    }
}

pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, caller: &Caller, input: ChangePasswordInput) -> AuthResult<()> {
        let mut account = self
            .account_repo
            .find_by_id(&caller.account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        authorize(caller, Some(&account.account_id), Action::Edit)?;

        let old_password = ClearTextPassword::for_verification(input.old_password);
        if !account
            .password_hash
            .verify(&old_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let new_password = ClearTextPassword::new(input.new_password)?;
        account.set_password(new_password.hash(self.config.pepper())?);
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Password changed");
        Ok(())
    }
}
