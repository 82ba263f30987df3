//! Sign In Use Case
//!
//! Authenticates a user with email + password and issues a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::{self, Session};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> SignInUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<Session> {
        // A malformed address cannot belong to any account
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !account
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        // Checked after the password so a wrong password never reveals the account state
        if !account.can_sign_in() {
            return Err(AuthError::AccountDisabled);
        }

        tracing::info!(account_id = %account.account_id, "Account signed in");

        session::issue(&self.config, account)
    }
}
