//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod confirm_payment;
pub mod create_payment;
pub mod lifecycle;
pub mod query;
pub(crate) mod transition;

pub use config::PaymentConfig;
pub use confirm_payment::ConfirmPaymentUseCase;
pub use create_payment::{CreatePaymentInput, CreatePaymentUseCase, CreatedPayment};
pub use lifecycle::PaymentLifecycleUseCase;
pub use query::{PaymentQueryUseCase, PaymentStats};
