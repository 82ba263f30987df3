//! Payment Method

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Stripe,
    PayPal,
}

impl PaymentMethod {
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "STRIPE",
            PaymentMethod::PayPal => "PAYPAL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "STRIPE" => Some(PaymentMethod::Stripe),
            "PAYPAL" => Some(PaymentMethod::PayPal),
            _ => None,
        }
    }

    /// Human-readable provider name used in log fields and error messages
    pub const fn provider_name(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
