//! Domain Layer
//!
//! Contains entities, value objects, repository and gateway traits.

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod revenue;
pub mod value_object;

pub use entity::payment::Payment;
pub use gateway::{Checkout, PaymentGateway, ProviderOutcome};
pub use repository::PaymentRepository;
pub use revenue::RevenueWindow;
