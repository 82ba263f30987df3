//! Product Id Value Object
//!
//! 外部カタログの商品 ID。中身は解釈しない。
//!
//! ## 不変条件
//! - 前後の空白を除去
//! - 長さ: 1〜100 文字
//! - 制御文字を含まない

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const PRODUCT_ID_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let id = raw.as_ref().trim();

        if id.is_empty() {
            return Err(AppError::bad_request("Product id is required"));
        }

        if id.chars().count() > PRODUCT_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Product id must be at most {} characters",
                PRODUCT_ID_MAX_LENGTH
            )));
        }

        if id.chars().any(char::is_control) {
            return Err(AppError::bad_request("Product id contains invalid characters"));
        }

        Ok(Self(id.to_string()))
    }

    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
