//! Revenue Windows
//!
//! Half-open UTC intervals `[start, end)` over `completed_at`.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};

use crate::error::{PaymentError, PaymentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RevenueWindow {
    pub fn month(year: i32, month: u32) -> PaymentResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            PaymentError::InvalidInput(format!("Invalid month: {year}-{month}"))
        })?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| PaymentError::InvalidInput(format!("Invalid month: {year}-{month}")))?;
        Ok(Self::between(first, next))
    }

    pub fn day(date: NaiveDate) -> PaymentResult<Self> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| PaymentError::InvalidInput(format!("Invalid date: {date}")))?;
        Ok(Self::between(date, next))
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end: end.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_window_rolls_over_year() {
        let window = RevenueWindow::month(2024, 12).unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_is_half_open() {
        let window = RevenueWindow::day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).unwrap();
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(matches!(
            RevenueWindow::month(2024, 13),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(RevenueWindow::month(2024, 0).is_err());
    }
}
