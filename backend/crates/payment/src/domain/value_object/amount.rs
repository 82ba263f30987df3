//! Amount Value Object
//!
//! 決済金額。DB 上は `NUMERIC(12,2)`。
//!
//! ## 不変条件
//! - 0 より大きい
//! - 小数部は 2 桁まで
//! - `NUMERIC(12,2)` に収まる

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::fmt;

use crate::error::{PaymentError, PaymentResult};

const MAX_SCALE: u32 = 2;

/// Largest value `NUMERIC(12,2)` can hold
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> PaymentResult<Self> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::InvalidInput(
                "Invalid payment amount".to_string(),
            ));
        }

        if value.normalize().scale() > MAX_SCALE {
            return Err(PaymentError::InvalidInput(format!(
                "Amount must have at most {} decimal places",
                MAX_SCALE
            )));
        }

        if value > MAX_AMOUNT {
            return Err(PaymentError::InvalidInput(
                "Amount exceeds the maximum allowed".to_string(),
            ));
        }

        let mut value = value;
        value.rescale(MAX_SCALE);
        Ok(Self(value))
    }

    pub fn from_db(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Amount in the currency's minor unit (cents, paise)
    pub fn minor_units(&self) -> PaymentResult<i64> {
        (self.0 * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .ok_or_else(|| PaymentError::Internal(format!("Amount out of range: {}", self.0)))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(
            Amount::new(Decimal::ZERO),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(Amount::new(dec("-5.00")).is_err());
    }

    #[test]
    fn test_rejects_more_than_two_decimals() {
        assert!(Amount::new(dec("10.001")).is_err());
        // trailing zeros do not count
        assert!(Amount::new(dec("10.100")).is_ok());
    }

    #[test]
    fn test_rejects_values_beyond_column_precision() {
        assert!(Amount::new(dec("9999999999.99")).is_ok());
        assert!(Amount::new(dec("10000000000.00")).is_err());
    }

    #[test]
    fn test_minor_units_and_display() {
        let amount = Amount::new(dec("499.5")).unwrap();
        assert_eq!(amount.minor_units().unwrap(), 49_950);
        assert_eq!(amount.to_string(), "499.50");

        let amount = Amount::new(dec("12")).unwrap();
        assert_eq!(amount.minor_units().unwrap(), 1_200);
        assert_eq!(amount.to_string(), "12.00");
    }
}
