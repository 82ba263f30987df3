//! Value Object Module

pub mod images;
pub mod product_id;
pub mod rating;
pub mod review_text;

pub use images::ReviewImages;
pub use kernel::id::{AccountId, ReviewId};
pub use product_id::ProductId;
pub use rating::Rating;
pub use review_text::ReviewText;
