//! Review Images
//!
//! Ordered list of image URLs attached to a review.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const IMAGE_URL_MAX_LENGTH: usize = 512;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReviewImages(Vec<String>);

impl ReviewImages {
    pub fn new(urls: Vec<String>, max_images: usize) -> AppResult<Self> {
        if urls.len() > max_images {
            return Err(AppError::bad_request(format!(
                "At most {} images are allowed",
                max_images
            )));
        }

        let mut images = Vec::with_capacity(urls.len());
        for url in urls {
            let url = url.trim();
            let has_scheme = url.starts_with("https://") || url.starts_with("http://");
            if !has_scheme
                || url.len() > IMAGE_URL_MAX_LENGTH
                || url.chars().any(|c| c.is_control() || c.is_whitespace())
            {
                return Err(AppError::bad_request("Invalid image URL"));
            }
            images.push(url.to_string());
        }

        Ok(Self(images))
    }

    pub fn from_db(urls: Vec<String>) -> Self {
        Self(urls)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://cdn.example.com/{i}.jpg")).collect()
    }

    #[test]
    fn test_image_count_limit() {
        assert_eq!(ReviewImages::new(urls(10), 10).unwrap().len(), 10);
        assert!(ReviewImages::new(urls(11), 10).is_err());
        assert!(ReviewImages::new(Vec::new(), 10).unwrap().is_empty());
    }

    #[test]
    fn test_order_is_kept_and_bad_urls_rejected() {
        let images = ReviewImages::new(urls(3), 10).unwrap();
        assert_eq!(images.as_slice()[2], "https://cdn.example.com/2.jpg");

        assert!(ReviewImages::new(vec!["javascript:alert(1)".to_string()], 10).is_err());
        assert!(ReviewImages::new(vec!["https://a b".to_string()], 10).is_err());
    }
}
