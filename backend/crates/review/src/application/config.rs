//! Application Configuration

/// Review input limits
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub max_images: usize,
    pub title_max_length: usize,
    pub comment_max_length: usize,
    pub search_term_max_length: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_images: 10,
            title_max_length: 200,
            comment_max_length: 2000,
            search_term_max_length: 100,
        }
    }
}

impl ReviewConfig {
    pub fn development() -> Self {
        Self::default()
    }
}
