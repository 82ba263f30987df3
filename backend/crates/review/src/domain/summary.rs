//! Rating Summary
//!
//! Aggregate for one product: average, count and per-star distribution.

use std::collections::BTreeMap;

use crate::domain::value_object::Rating;

#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    /// 0.0 when there are no reviews
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Always holds all five ratings
    pub distribution: BTreeMap<u8, i64>,
}

impl RatingSummary {
    /// Build from `(rating, count)` pairs as returned by a GROUP BY
    pub fn from_counts(counts: impl IntoIterator<Item = (Rating, i64)>) -> Self {
        let mut distribution: BTreeMap<u8, i64> = Rating::all().map(|r| (r.value(), 0)).collect();
        for (rating, count) in counts {
            *distribution.entry(rating.value()).or_insert(0) += count;
        }

        let total_reviews: i64 = distribution.values().sum();
        let weighted: i64 = distribution
            .iter()
            .map(|(rating, count)| i64::from(*rating) * count)
            .sum();

        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            weighted as f64 / total_reviews as f64
        };

        Self {
            average_rating,
            total_reviews,
            distribution,
        }
    }
}
