//! Check Session Use Case
//!
//! Resolves a bearer token to the active account it names.

use std::sync::Arc;

use kernel::access::Caller;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> CheckSessionUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    /// Fails with `SessionInvalid` on a bad or expired token, or when the
    /// account no longer exists or has been deactivated.
    pub async fn execute(&self, token: &str) -> AuthResult<Account> {
        let claims = self.config.token_signer().verify(token)?;

        let account_id = Uuid::parse_str(&claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| AuthError::SessionInvalid)?;

        let account = self
            .account_repo
            .find_by_id(&account_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if !account.is_active {
            return Err(AuthError::SessionInvalid);
        }

        Ok(account)
    }

    /// Like [`execute`](Self::execute) but yields the request identity.
    ///
    /// The role comes from the stored account, not from the token claims,
    /// so a role change takes effect on the next request.
    pub async fn caller(&self, token: &str) -> AuthResult<Caller> {
        let account = self.execute(token).await?;
        Ok(Caller::new(
            account.account_id,
            account.email.as_str(),
            account.role,
        ))
    }
}
