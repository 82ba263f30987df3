//! Caller identity and authorization
//!
//! Every workflow that touches an owned resource asks [`can_access`] (or
//! [`authorize`]) before doing anything else. Role checks are never written
//! inline in handlers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Authenticated account making the current request.
///
/// Inserted into request extensions by the auth middleware once the bearer
/// token has been verified against an active account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub account_id: AccountId,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn new(account_id: AccountId, email: impl Into<String>, role: Role) -> Self {
        Self {
            account_id,
            email: email.into(),
            role,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[inline]
    pub fn owns(&self, owner: &AccountId) -> bool {
        &self.account_id == owner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Edit,
    Confirm,
    Cancel,
    Delete,
    Refund,
    Administer,
}

impl Action {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Edit => "edit",
            Action::Confirm => "confirm",
            Action::Cancel => "cancel",
            Action::Delete => "delete",
            Action::Refund => "refund",
            Action::Administer => "administer",
        }
    }
}

/// Decides whether `caller` may perform `action` on a resource owned by `owner`.
///
/// `owner` is `None` for resources without an owner (collections, statistics).
///
/// | action                              | allowed            |
/// |-------------------------------------|--------------------|
/// | `Create`                            | any caller         |
/// | `Read`, `Confirm`, `Cancel`, `Delete` | owner or admin   |
/// | `Edit`                              | owner only         |
/// | `Refund`, `Administer`              | admin only         |
pub fn can_access(caller: &Caller, owner: Option<&AccountId>, action: Action) -> bool {
    let is_owner = owner.is_some_and(|owner| caller.owns(owner));
    match action {
        Action::Create => true,
        Action::Read | Action::Confirm | Action::Cancel | Action::Delete => {
            is_owner || caller.is_admin()
        }
        Action::Edit => is_owner,
        Action::Refund | Action::Administer => caller.is_admin(),
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Not permitted to {} this resource", action.as_str())]
pub struct AccessDenied {
    pub action: Action,
}

pub fn authorize(
    caller: &Caller,
    owner: Option<&AccountId>,
    action: Action,
) -> Result<(), AccessDenied> {
    if can_access(caller, owner, action) {
        Ok(())
    } else {
        Err(AccessDenied { action })
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        use crate::error::app_error::OptionExt;
        use crate::error::kind::ErrorKind;

        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or_app_err(ErrorKind::Unauthorized, "Authentication required")
    }
}
