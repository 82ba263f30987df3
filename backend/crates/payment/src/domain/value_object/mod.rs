//! Value Object Module

pub mod amount;
pub mod payment_method;
pub mod payment_status;
pub mod transaction_id;

pub use amount::Amount;
pub use kernel::id::{AccountId, PaymentId};
pub use payment_method::PaymentMethod;
pub use payment_status::PaymentStatus;
pub use transaction_id::TransactionId;
