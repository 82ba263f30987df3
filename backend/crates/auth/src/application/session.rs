//! Token issuance shared by sign up and sign in.

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::error::AuthResult;

/// An account together with a freshly signed bearer token
#[derive(Debug)]
pub struct Session {
    pub account: Account,
    pub token: String,
}

pub(crate) fn issue(config: &AuthConfig, account: Account) -> AuthResult<Session> {
    let token = config.token_signer().issue(
        &account.account_id.to_string(),
        account.email.as_str(),
        account.role.code(),
    )?;
    Ok(Session { account, token })
}
