#[cfg(test)]
mod tests {
    use crate::errors::ValidationError;
    use crate::services::claim_rules::{total_amount, validate_claim_values, MonthlyAllowance};
    use crate::types::domain::{Claim, ClaimStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn claim(id: i32, user_id: i32, date: (i32, u32, u32), hours: &str) -> Claim {
        let hours_worked = d(hours);
        Claim {
            id,
            claim_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status: ClaimStatus::Pending,
            hours_worked,
            hourly_rate: d("450"),
            total_amount: hours_worked * d("450"),
            submission_date: Utc.with_ymd_and_hms(2024, 1, 20, 8, 0, 0).unwrap(),
            last_updated: None,
            status_notes: None,
            notes: None,
            user_id,
        }
    }

    #[test]
    fn test_hours_bounds_are_inclusive() {
        assert!(validate_claim_values(d("0.1"), d("450"), 1).is_ok());
        assert!(validate_claim_values(d("168"), d("450"), 1).is_ok());
        assert_eq!(
            validate_claim_values(d("0.09"), d("450"), 1),
            Err(ValidationError::HoursOutOfRange)
        );
        assert_eq!(
            validate_claim_values(d("168.5"), d("450"), 1),
            Err(ValidationError::HoursOutOfRange)
        );
    }

    #[test]
    fn test_rate_must_be_positive() {
        assert_eq!(
            validate_claim_values(d("10"), Decimal::ZERO, 1),
            Err(ValidationError::NonPositiveRate)
        );
        assert_eq!(
            validate_claim_values(d("10"), d("-5"), 1),
            Err(ValidationError::NonPositiveRate)
        );
    }

    #[test]
    fn test_user_must_be_positive() {
        assert_eq!(
            validate_claim_values(d("10"), d("450"), 0),
            Err(ValidationError::InvalidUser)
        );
    }

    #[test]
    fn test_total_amount_is_exact() {
        assert_eq!(total_amount(d("40"), d("450")), Ok(d("18000")));
        assert_eq!(total_amount(d("0.1"), d("33.33")), Ok(d("3.333")));
    }

    #[test]
    fn test_unrepresentable_total_is_a_validation_error() {
        let huge_rate = Decimal::MAX / Decimal::from(2);

        assert_eq!(total_amount(d("168"), huge_rate), Err(ValidationError::AmountTooLarge));
        assert_eq!(
            validate_claim_values(d("168"), huge_rate, 3),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(ValidationError::AmountTooLarge.field(), Some("hourlyRate"));

        // The same rate is fine while the product still fits
        assert!(validate_claim_values(d("1"), huge_rate, 3).is_ok());
    }

    #[test]
    fn test_allowance_counts_only_same_user_and_month() {
        let claims = vec![
            claim(1, 1, (2024, 1, 5), "100"),
            claim(2, 1, (2024, 1, 31), "50"),
            claim(3, 1, (2024, 2, 1), "70"),
            claim(4, 2, (2024, 1, 10), "90"),
            claim(5, 1, (2023, 1, 10), "60"),
        ];

        let allowance = MonthlyAllowance::for_month(&claims, 1, 2024, 1, d("180"));

        assert_eq!(allowance.used, d("150"));
        assert_eq!(allowance.remaining(), d("30"));
        assert!(!allowance.is_exhausted());
    }

    #[test]
    fn test_cap_allows_reaching_exactly_the_limit() {
        let allowance = MonthlyAllowance { used: d("150"), cap: d("180") };

        assert!(allowance.check(d("30")).is_ok());
        assert_eq!(
            allowance.check(d("30.5")),
            Err(ValidationError::MonthlyCapExceeded { cap: d("180"), remaining: d("30") })
        );
    }

    #[test]
    fn test_exhausted_allowance() {
        let allowance = MonthlyAllowance { used: d("185"), cap: d("180") };

        assert!(allowance.is_exhausted());
        assert_eq!(allowance.remaining(), Decimal::ZERO);
    }
}
