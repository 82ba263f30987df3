//! Payment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Payment entity, status machine, repository and gateway traits
//! - `application/` - Use cases (create, confirm, cancel, refund, queries, revenue)
//! - `infra/` - PostgreSQL ledger, Stripe and PayPal HTTP clients
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Lifecycle
//! `PENDING -> COMPLETED | FAILED | CANCELLED`, then `COMPLETED -> REFUNDED`.
//! Every status change is a compare-and-set against the stored status, so two
//! concurrent confirmations cannot both win.
//!
//! Provider clients are built once at start-up and handed to the router.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::{PayPalEnvironment, PayPalSettings, PaymentConfig, StripeSettings};
pub use error::{PaymentError, PaymentResult};
pub use infra::paypal::PayPalClient;
pub use infra::postgres::PgPaymentRepository;
pub use infra::stripe::StripeClient;
pub use presentation::router::{payments_router, payments_router_generic};
