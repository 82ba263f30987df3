//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::crypto::{MIN_SECRET_LENGTH, random_bytes};
use platform::token::TokenSigner;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing bearer tokens (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Bearer token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; MIN_SECRET_LENGTH],
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config with a random token secret (tokens die with the process)
    pub fn development() -> Self {
        Self {
            token_secret: random_bytes(MIN_SECRET_LENGTH),
            ..Default::default()
        }
    }

    pub fn token_signer(&self) -> TokenSigner {
        let ttl = chrono::Duration::from_std(self.token_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(24));
        TokenSigner::new(&self.token_secret, ttl)
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
