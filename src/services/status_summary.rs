use rust_decimal::Decimal;

use crate::types::domain::{Claim, ClaimStatus};

/// Per-status totals shown on the dashboards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub processing: usize,
    pub completed: usize,
    pub approved_amount: Decimal,
}

impl StatusSummary {
    pub fn of<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> Self {
        claims.into_iter().fold(Self::default(), |mut summary, claim| {
            summary.total += 1;
            if claim.status.matches(ClaimStatus::Pending.as_str()) {
                summary.pending += 1;
            } else if claim.status.is_approved() {
                summary.approved += 1;
                summary.approved_amount = summary.approved_amount.saturating_add(claim.total_amount);
            } else if claim.status.matches(ClaimStatus::Rejected.as_str()) {
                summary.rejected += 1;
            } else if claim.status.matches(ClaimStatus::Processing.as_str()) {
                summary.processing += 1;
            } else if claim.status.matches(ClaimStatus::Completed.as_str()) {
                summary.completed += 1;
            }
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn claim(id: i32, status: &str, total: i64) -> Claim {
        Claim {
            id,
            claim_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: ClaimStatus::from(status),
            hours_worked: Decimal::ONE,
            hourly_rate: Decimal::from(total),
            total_amount: Decimal::from(total),
            submission_date: Utc::now(),
            last_updated: None,
            status_notes: None,
            notes: None,
            user_id: 1,
        }
    }

    #[test]
    fn test_approved_amount_saturates() {
        let mut big = claim(1, "Approved", 0);
        big.total_amount = Decimal::MAX;
        let claims = vec![big.clone(), Claim { id: 2, ..big }];

        let summary = StatusSummary::of(&claims);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.approved_amount, Decimal::MAX);
    }

    #[test]
    fn test_counts_ignore_status_case() {
        let claims = vec![
            claim(1, "Pending", 10),
            claim(2, "pending", 10),
            claim(3, "APPROVED", 100),
            claim(4, "Approved", 50),
            claim(5, "Rejected", 10),
            claim(6, "Processing", 10),
            claim(7, "completed", 10),
            claim(8, "On Hold", 10),
        ];

        let summary = StatusSummary::of(&claims);

        assert_eq!(summary.total, 8);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.processing, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.approved_amount, Decimal::from(150));
    }
}
