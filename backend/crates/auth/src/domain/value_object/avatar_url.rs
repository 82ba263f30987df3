//! Avatar URL Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const AVATAR_URL_MAX_LENGTH: usize = 512;

/// Absolute http(s) reference to a profile picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let url = raw.into().trim().to_string();

        if url.len() > AVATAR_URL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Avatar URL must be at most {} characters",
                AVATAR_URL_MAX_LENGTH
            )));
        }

        let has_scheme = url.starts_with("https://") || url.starts_with("http://");
        if !has_scheme || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request("Avatar URL must be an http(s) URL"));
        }

        Ok(Self(url))
    }

    pub fn from_db(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_url() {
        assert!(AvatarUrl::new("https://cdn.example.com/a.png").is_ok());
        assert!(AvatarUrl::new("ftp://cdn.example.com/a.png").is_err());
        assert!(AvatarUrl::new("https://cdn.example.com/a b.png").is_err());
    }
}
