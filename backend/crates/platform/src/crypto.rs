//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Minimum length of an HMAC signing secret
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Secret must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Decode a base64 signing secret and enforce [`MIN_SECRET_LENGTH`].
pub fn decode_secret(encoded: &str) -> Result<Vec<u8>, SecretError> {
    let bytes = from_base64(encoded.trim())?;
    if bytes.len() < MIN_SECRET_LENGTH {
        return Err(SecretError::TooShort {
            min: MIN_SECRET_LENGTH,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_length() {
        assert_eq!(random_bytes(32).len(), 32);
        assert_ne!(random_bytes(32), random_bytes(32));
    }

    #[test]
    fn test_decode_secret() {
        let secret = random_bytes(MIN_SECRET_LENGTH);
        assert_eq!(decode_secret(&to_base64(&secret)).unwrap(), secret);

        let short = to_base64(&random_bytes(8));
        assert!(matches!(
            decode_secret(&short),
            Err(SecretError::TooShort { actual: 8, .. })
        ));
        assert!(matches!(
            decode_secret("***"),
            Err(SecretError::Encoding(_))
        ));
    }
}
