//! Signed bearer tokens (JWT, HS256)
//!
//! Tokens are self-contained: nothing is stored server-side, so signing out
//! is a client-side discard.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies tokens with one HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `sub` valid for the configured TTL.
    pub fn issue(&self, sub: &str, email: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry (no leeway).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(&[7u8; 32], Duration::hours(24))
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer();
        let token = signer.issue("acc-1", "a@x.com", "USER").unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, "acc-1");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = signer();
        let now = Utc::now().timestamp();
        let token = signer
            .sign(&Claims {
                sub: "acc-1".into(),
                email: "a@x.com".into(),
                role: "USER".into(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();

        assert!(matches!(signer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = TokenSigner::new(&[9u8; 32], Duration::hours(1))
            .issue("acc-1", "a@x.com", "ADMIN")
            .unwrap();

        assert!(matches!(signer().verify(&token), Err(TokenError::Invalid)));
        assert!(matches!(signer().verify("not.a.jwt"), Err(TokenError::Invalid)));
    }
}
