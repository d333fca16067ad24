use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ClaimStatus;
use crate::errors::ValidationError;
use crate::services::claim_rules::total_amount;

/// A lecturer's work-hours submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i32,
    pub claim_date: NaiveDate,
    #[serde(default)]
    pub status: ClaimStatus,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub submission_date: DateTime<Utc>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub user_id: i32,
}

impl Claim {
    /// Keeps `total_amount == hours_worked * hourly_rate`
    pub fn recompute_total(&mut self) -> Result<(), ValidationError> {
        self.total_amount = total_amount(self.hours_worked, self.hourly_rate)?;
        Ok(())
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.claim_date.year() == year && self.claim_date.month() == month
    }

    /// Timestamp of the most recent change, falling back to submission
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_updated.unwrap_or(self.submission_date)
    }
}
