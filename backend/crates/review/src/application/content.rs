//! Raw review input shared by the submit and edit flows.

use crate::application::config::ReviewConfig;
use crate::domain::entity::review::ReviewContent;
use crate::domain::value_object::{Rating, ReviewImages, ReviewText};
use crate::error::ReviewResult;

pub struct ReviewContentInput {
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub images: Vec<String>,
}

impl ReviewContentInput {
    pub(crate) fn validate(self, config: &ReviewConfig) -> ReviewResult<ReviewContent> {
        Ok(ReviewContent {
            rating: Rating::new(self.rating)?,
            title: ReviewText::parse(self.title.as_deref(), "Title", config.title_max_length)?,
            comment: ReviewText::parse(
                self.comment.as_deref(),
                "Comment",
                config.comment_max_length,
            )?,
            images: ReviewImages::new(self.images, config.max_images)?,
        })
    }
}
