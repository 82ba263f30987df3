//! PostgreSQL Repository Implementations
//!
//! Every read joins `accounts` for the author's public profile.

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::search::escape_like;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::review::{Author, Review, ReviewWithAuthor};
use crate::domain::repository::{ReviewOrder, ReviewQuery, ReviewRepository};
use crate::domain::summary::RatingSummary;
use crate::domain::value_object::{
    AccountId, ProductId, Rating, ReviewId, ReviewImages, ReviewText,
};
use crate::error::{ReviewError, ReviewResult};

/// Columns of `r` (reviews) and `a` (accounts) mapped by [`ReviewRow`]
const REVIEW_COLUMNS: &str = r#"
    r.review_id,
    r.account_id,
    r.product_id,
    r.rating,
    r.title,
    r.comment,
    r.images,
    r.is_verified,
    r.helpful_count,
    r.created_at,
    r.updated_at,
    a.full_name AS author_name,
    a.avatar_url AS author_avatar_url
"#;

/// PostgreSQL-backed review repository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: &Review) -> ReviewResult<ReviewWithAuthor> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            WITH r AS (
                INSERT INTO reviews (
                    review_id,
                    account_id,
                    product_id,
                    rating,
                    title,
                    comment,
                    images,
                    is_verified,
                    helpful_count,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
            )
            SELECT {REVIEW_COLUMNS}
            FROM r JOIN accounts a ON a.account_id = r.account_id
            "#
        ))
        .bind(review.review_id.as_uuid())
        .bind(review.account_id.as_uuid())
        .bind(review.product_id.as_str())
        .bind(i16::from(review.rating.value()))
        .bind(review.title.as_ref().map(ReviewText::as_str))
        .bind(review.comment.as_ref().map(ReviewText::as_str))
        .bind(review.images.as_slice())
        .bind(review.is_verified)
        .bind(review.helpful_count)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ReviewError::AlreadyReviewed
            } else {
                ReviewError::Database(e)
            }
        })?;

        row.into_review()
    }

    async fn update(&self, review: &Review) -> ReviewResult<ReviewWithAuthor> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            WITH r AS (
                UPDATE reviews SET
                    rating = $2,
                    title = $3,
                    comment = $4,
                    images = $5,
                    updated_at = $6
                WHERE review_id = $1
                RETURNING *
            )
            SELECT {REVIEW_COLUMNS}
            FROM r JOIN accounts a ON a.account_id = r.account_id
            "#
        ))
        .bind(review.review_id.as_uuid())
        .bind(i16::from(review.rating.value()))
        .bind(review.title.as_ref().map(ReviewText::as_str))
        .bind(review.comment.as_ref().map(ReviewText::as_str))
        .bind(review.images.as_slice())
        .bind(review.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(ReviewError::NotFound)?.into_review()
    }

    async fn delete(&self, review_id: &ReviewId) -> ReviewResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ReviewError::NotFound);
        }

        Ok(())
    }

    async fn find_by_id(&self, review_id: &ReviewId) -> ReviewResult<Option<ReviewWithAuthor>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews r JOIN accounts a ON a.account_id = r.account_id
            WHERE r.review_id = $1
            "#
        ))
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReviewRow::into_review).transpose()
    }

    async fn exists_for(
        &self,
        account_id: &AccountId,
        product_id: &ProductId,
    ) -> ReviewResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE account_id = $1 AND product_id = $2)",
        )
        .bind(account_id.as_uuid())
        .bind(product_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_for_product(
        &self,
        product_id: &ProductId,
        query: &ReviewQuery,
    ) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews r JOIN accounts a ON a.account_id = r.account_id
            WHERE r.product_id = $1
              AND ($2::SMALLINT IS NULL OR r.rating = $2)
              AND ($3 = FALSE OR r.is_verified)
              AND (
                  $4::TEXT IS NULL
                  OR r.title ILIKE '%' || $4 || '%' ESCAPE '\'
                  OR r.comment ILIKE '%' || $4 || '%' ESCAPE '\'
              )
            ORDER BY
                CASE WHEN $5 THEN r.helpful_count ELSE 0 END DESC,
                r.created_at DESC
            "#
        ))
        .bind(product_id.as_str())
        .bind(query.rating.map(|r| i16::from(r.value())))
        .bind(query.verified_only)
        .bind(query.term.as_deref().map(escape_like))
        .bind(query.order == ReviewOrder::MostHelpful)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_review).collect()
    }

    async fn list_by_account(&self, account_id: &AccountId) -> ReviewResult<Vec<ReviewWithAuthor>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews r JOIN accounts a ON a.account_id = r.account_id
            WHERE r.account_id = $1
            ORDER BY r.created_at DESC
            "#
        ))
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_review).collect()
    }

    async fn increment_helpful(&self, review_id: &ReviewId) -> ReviewResult<Option<i32>> {
        let count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE reviews SET helpful_count = helpful_count + 1
            WHERE review_id = $1
            RETURNING helpful_count
            "#,
        )
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(count)
    }

    async fn rating_summary(&self, product_id: &ProductId) -> ReviewResult<RatingSummary> {
        let rows: Vec<(i16, i64)> = sqlx::query_as(
            r#"
            SELECT rating, COUNT(*) FROM reviews
            WHERE product_id = $1
            GROUP BY rating
            "#,
        )
        .bind(product_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let counts = rows
            .into_iter()
            .map(|(rating, count)| Ok((stored_rating(rating)?, count)))
            .collect::<ReviewResult<Vec<_>>>()?;

        Ok(RatingSummary::from_counts(counts))
    }
}

fn stored_rating(value: i16) -> ReviewResult<Rating> {
    Rating::new(i64::from(value))
        .map_err(|_| ReviewError::Internal(format!("Invalid rating: {}", value)))
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    account_id: Uuid,
    product_id: String,
    rating: i16,
    title: Option<String>,
    comment: Option<String>,
    images: Vec<String>,
    is_verified: bool,
    helpful_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
    author_avatar_url: Option<String>,
}

impl ReviewRow {
    fn into_review(self) -> ReviewResult<ReviewWithAuthor> {
        let account_id = AccountId::from_uuid(self.account_id);

        Ok(ReviewWithAuthor {
            review: Review {
                review_id: ReviewId::from_uuid(self.review_id),
                account_id,
                product_id: ProductId::from_db(self.product_id),
                rating: stored_rating(self.rating)?,
                title: self.title.map(ReviewText::from_db),
                comment: self.comment.map(ReviewText::from_db),
                images: ReviewImages::from_db(self.images),
                is_verified: self.is_verified,
                helpful_count: self.helpful_count,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: Author {
                account_id,
                full_name: self.author_name,
                avatar_url: self.author_avatar_url,
            },
        })
    }
}
