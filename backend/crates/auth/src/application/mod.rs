//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod check_session;
pub mod config;
pub mod profile;
pub mod session;
pub mod sign_in;
pub mod sign_up;

pub use admin::AccountAdminUseCase;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use profile::{ChangePasswordInput, ChangePasswordUseCase, ProfileUseCase, UpdateProfileInput};
pub use session::Session;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
