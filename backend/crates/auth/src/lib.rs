//! Auth (Accounts & Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait
//! - `application/` - Use cases (sign up/in, session check, profile, admin)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router, caller middleware
//!
//! ## Features
//! - Sign up / sign in with email + password
//! - Stateless JWT bearer tokens (sign out is a client-side discard)
//! - Profile read/update, password change, self-deactivation
//! - Admin account listing, search, statistics, activation and role changes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Inactive accounts cannot sign in, and their tokens stop resolving
//! - Email uniqueness enforced by a unique index on the lower-cased address

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::middleware::{AuthMiddlewareState, resolve_caller};
pub use presentation::router::{auth_router, auth_router_generic, users_router, users_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
