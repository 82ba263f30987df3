//! Shared Kernel - vocabulary shared by every storefront domain crate
//!
//! - Error kinds, the unified [`error::app_error::AppError`] and result alias
//! - Typed entity identifiers ([`id`])
//! - Caller identity and the single authorization predicate ([`access`])
//! - The JSON success envelope returned by every endpoint ([`response`])
//!
//! Only things whose meaning is identical in accounts, payments and reviews
//! live here.

pub mod access;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;
pub mod search;
