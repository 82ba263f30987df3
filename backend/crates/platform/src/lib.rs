//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no storefront vocabulary:
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (JWT, HS256)
//! - `Authorization` header parsing
//! - Random secret and base64 helpers

pub mod client;
pub mod crypto;
pub mod password;
pub mod token;
