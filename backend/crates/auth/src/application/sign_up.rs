//! Sign Up Use Case
//!
//! Creates a new USER account and signs the caller in.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::{self, Session};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, full_name::FullName};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

pub struct SignUpUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<Session> {
        let email = Email::new(input.email)?;
        let full_name = FullName::new(&input.full_name)?;
        let password = ClearTextPassword::new(input.password)?;

        if self.account_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password.hash(self.config.pepper())?;
        let account = Account::new(email, password_hash, full_name);

        // A concurrent sign-up with the same email loses on the unique index
        self.account_repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account signed up"
        );

        session::issue(&self.config, account)
    }
}
