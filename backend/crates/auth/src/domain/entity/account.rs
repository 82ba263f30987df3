//! Account Entity
//!
//! Identity, credentials and profile of a storefront customer or admin.
//! Accounts are never deleted: deactivation flips `is_active`.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    AccountId, Role, avatar_url::AvatarUrl, email::Email, full_name::FullName,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique, lower-cased
    pub email: Email,
    pub password_hash: HashedPassword,
    pub full_name: FullName,
    pub avatar_url: Option<AvatarUrl>,
    /// Changed only by an admin
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New active USER account
    pub fn new(email: Email, password_hash: HashedPassword, full_name: FullName) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            email,
            password_hash,
            full_name,
            avatar_url: None,
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_sign_in(&self) -> bool {
        self.is_active
    }

    pub fn update_profile(&mut self, full_name: Option<FullName>, avatar_url: Option<AvatarUrl>) {
        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(avatar_url) = avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        self.touch();
    }

    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.touch();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
