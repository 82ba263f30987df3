//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ReviewContentInput;
use crate::domain::entity::review::{Author, ReviewWithAuthor};
use crate::domain::summary::RatingSummary;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: String,
    pub rating: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Full replacement of the editable fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateReviewRequest {
    pub fn into_parts(self) -> (String, ReviewContentInput) {
        (
            self.product_id,
            ReviewContentInput {
                rating: self.rating,
                title: self.title,
                comment: self.comment,
                images: self.images,
            },
        )
    }
}

impl From<UpdateReviewRequest> for ReviewContentInput {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            rating: req.rating,
            title: req.title,
            comment: req.comment,
            images: req.images,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingQuery {
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.account_id.into_uuid(),
            full_name: author.full_name.clone(),
            avatar_url: author.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub product_id: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub is_verified: bool,
    pub helpful_count: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: AuthorResponse,
}

impl From<&ReviewWithAuthor> for ReviewResponse {
    fn from(item: &ReviewWithAuthor) -> Self {
        let review = &item.review;
        Self {
            id: review.review_id.into_uuid(),
            product_id: review.product_id.as_str().to_string(),
            rating: review.rating.value(),
            title: review.title.as_ref().map(|t| t.as_str().to_string()),
            comment: review.comment.as_ref().map(|c| c.as_str().to_string()),
            is_verified: review.is_verified,
            helpful_count: review.helpful_count,
            images: review.images.as_slice().to_vec(),
            created_at: review.created_at,
            updated_at: review.updated_at,
            user: AuthorResponse::from(&item.author),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewEnvelope {
    pub review: ReviewResponse,
}

impl From<&ReviewWithAuthor> for ReviewEnvelope {
    fn from(item: &ReviewWithAuthor) -> Self {
        Self {
            review: ReviewResponse::from(item),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsEnvelope {
    pub reviews: Vec<ReviewResponse>,
    pub count: usize,
}

impl From<Vec<ReviewWithAuthor>> for ReviewsEnvelope {
    fn from(items: Vec<ReviewWithAuthor>) -> Self {
        let reviews: Vec<ReviewResponse> = items.iter().map(ReviewResponse::from).collect();
        Self {
            count: reviews.len(),
            reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummaryResponse {
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Keys are "1" through "5"
    pub rating_distribution: BTreeMap<u8, i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryEnvelope {
    pub summary: RatingSummaryResponse,
}

impl From<RatingSummary> for SummaryEnvelope {
    fn from(summary: RatingSummary) -> Self {
        Self {
            summary: RatingSummaryResponse {
                average_rating: summary.average_rating,
                total_reviews: summary.total_reviews,
                rating_distribution: summary.distribution,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulResponse {
    pub helpful_count: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanReviewResponse {
    pub can_review: bool,
}
