//! Value Object Module

pub mod avatar_url;
pub mod email;
pub mod full_name;

pub use kernel::access::Role;
pub use kernel::id::AccountId;
