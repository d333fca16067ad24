use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::types::domain::Claim;

/// Inclusive lower bound for hours on a single claim (0.1)
pub fn min_hours() -> Decimal {
    Decimal::new(1, 1)
}

/// Inclusive upper bound for hours on a single claim (one week)
pub fn max_hours() -> Decimal {
    Decimal::from(168)
}

/// Check the values every claim must satisfy on create and edit
///
/// Validates in order (fail fast): hours, rate, user, then that the total
/// is representable.
pub fn validate_claim_values(
    hours_worked: Decimal,
    hourly_rate: Decimal,
    user_id: i32,
) -> Result<(), ValidationError> {
    if hours_worked < min_hours() || hours_worked > max_hours() {
        return Err(ValidationError::HoursOutOfRange);
    }
    if hourly_rate <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveRate);
    }
    if user_id <= 0 {
        return Err(ValidationError::InvalidUser);
    }
    total_amount(hours_worked, hourly_rate)?;
    Ok(())
}

/// `hours_worked * hourly_rate`; `AmountTooLarge` instead of overflowing
pub fn total_amount(hours_worked: Decimal, hourly_rate: Decimal) -> Result<Decimal, ValidationError> {
    hours_worked
        .checked_mul(hourly_rate)
        .ok_or(ValidationError::AmountTooLarge)
}

/// Hours a lecturer has used in one calendar month against the cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAllowance {
    pub used: Decimal,
    pub cap: Decimal,
}

impl MonthlyAllowance {
    /// Sum the hours of `user_id`'s claims whose claim date falls in `year`/`month`
    pub fn for_month(claims: &[Claim], user_id: i32, year: i32, month: u32, cap: Decimal) -> Self {
        let used = claims
            .iter()
            .filter(|c| c.user_id == user_id && c.in_month(year, month))
            .fold(Decimal::ZERO, |used, c| used.saturating_add(c.hours_worked));
        Self { used, cap }
    }

    /// Never negative, even if the cap was exceeded through direct edits
    pub fn remaining(&self) -> Decimal {
        self.cap.saturating_sub(self.used).max(Decimal::ZERO)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cap.saturating_sub(self.used) <= Decimal::ZERO
    }

    /// Reject a submission that would take the month over the cap
    pub fn check(&self, new_hours: Decimal) -> Result<(), ValidationError> {
        if self.used.saturating_add(new_hours) > self.cap {
            return Err(ValidationError::MonthlyCapExceeded {
                cap: self.cap,
                remaining: self.cap.saturating_sub(self.used),
            });
        }
        Ok(())
    }
}
