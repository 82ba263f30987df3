//! Review Title / Comment
//!
//! Optional free text. Blank input means "no text".

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReviewText(String);

impl ReviewText {
    /// `field` names the input in error messages
    pub fn parse(raw: Option<&str>, field: &str, max_chars: usize) -> AppResult<Option<Self>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let normalized: String = raw.nfc().collect();
        let text = normalized.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if text.chars().count() > max_chars {
            return Err(AppError::bad_request(format!(
                "{} must be at most {} characters",
                field, max_chars
            )));
        }

        // newlines and tabs are fine in a review body
        if text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(AppError::bad_request(format!(
                "{} contains invalid characters",
                field
            )));
        }

        Ok(Some(Self(text.to_string())))
    }

    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_none() {
        assert_eq!(ReviewText::parse(None, "Title", 10).unwrap(), None);
        assert_eq!(ReviewText::parse(Some("  \n "), "Title", 10).unwrap(), None);
    }

    #[test]
    fn test_length_limit_counts_characters() {
        assert!(ReviewText::parse(Some("ééééé"), "Title", 5).unwrap().is_some());
        let err = ReviewText::parse(Some("abcdef"), "Title", 5).unwrap_err();
        assert_eq!(err.message(), "Title must be at most 5 characters");
    }

    #[test]
    fn test_multiline_comment_is_allowed() {
        let text = ReviewText::parse(Some("Great.\nWould buy again."), "Comment", 100)
            .unwrap()
            .unwrap();
        assert_eq!(text.as_str(), "Great.\nWould buy again.");
        assert!(ReviewText::parse(Some("bad\u{0007}"), "Comment", 100).is_err());
    }
}
