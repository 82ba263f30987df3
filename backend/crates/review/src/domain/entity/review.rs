//! Review Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    AccountId, ProductId, Rating, ReviewId, ReviewImages, ReviewText,
};

#[derive(Debug, Clone)]
pub struct Review {
    pub review_id: ReviewId,
    pub account_id: AccountId,
    pub product_id: ProductId,
    pub rating: Rating,
    pub title: Option<ReviewText>,
    pub comment: Option<ReviewText>,
    pub images: ReviewImages,
    pub is_verified: bool,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable part of a review
#[derive(Debug, Clone)]
pub struct ReviewContent {
    pub rating: Rating,
    pub title: Option<ReviewText>,
    pub comment: Option<ReviewText>,
    pub images: ReviewImages,
}

impl Review {
    /// Purchase history is not tracked, so every review counts as verified.
    pub fn new(account_id: AccountId, product_id: ProductId, content: ReviewContent) -> Self {
        let now = Utc::now();
        Self {
            review_id: ReviewId::new(),
            account_id,
            product_id,
            rating: content.rating,
            title: content.title,
            comment: content.comment,
            images: content.images,
            is_verified: true,
            helpful_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace rating, text and images
    pub fn revise(&mut self, content: ReviewContent) {
        self.rating = content.rating;
        self.title = content.title;
        self.comment = content.comment;
        self.images = content.images;
        self.updated_at = Utc::now();
    }
}

/// Public profile of the reviewer, joined from the accounts table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub account_id: AccountId,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author: Author,
}
