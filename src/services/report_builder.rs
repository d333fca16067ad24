use chrono::{DateTime, NaiveDate, Utc};
use poem_openapi::Object;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::domain::{Claim, User};

const UNKNOWN_USER: &str = "Unknown User";

/// Optional filters; every supplied filter must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// Exact owner match; non-positive ids are ignored
    pub user_id: Option<i32>,
    /// Case-insensitive exact status match; blank is ignored
    pub status: Option<String>,
    /// Inclusive lower bound on the submission date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the submission date
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    fn admits(&self, claim: &Claim) -> bool {
        let submitted = claim.submission_date.date_naive();

        self.user_id.filter(|id| *id > 0).map_or(true, |id| claim.user_id == id)
            && self
                .status
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map_or(true, |status| claim.status.matches(status))
            && self.start_date.map_or(true, |start| submitted >= start)
            && self.end_date.map_or(true, |end| submitted <= end)
    }
}

/// Flat projection of a claim joined with its owner's name
#[derive(Object, Debug, Clone, PartialEq, Serialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ClaimReportRow {
    pub claim_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub claim_date: NaiveDate,
    pub status: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub submission_date: DateTime<Utc>,
}

/// Filter and project claims, newest submission first (ties by claim id)
pub fn build_report(claims: &[Claim], users: &[User], filter: &ReportFilter) -> Vec<ClaimReportRow> {
    let mut rows: Vec<ClaimReportRow> = claims
        .iter()
        .filter(|c| c.id > 0 && filter.admits(c))
        .map(|c| {
            let user_name = users
                .iter()
                .find(|u| u.id == c.user_id)
                .map(|u| u.display_name().trim().to_string())
                .unwrap_or_else(|| UNKNOWN_USER.to_string());

            ClaimReportRow {
                claim_id: c.id,
                user_id: c.user_id,
                user_name,
                claim_date: c.claim_date,
                status: c.status.as_str().to_string(),
                hours_worked: c.hours_worked,
                hourly_rate: c.hourly_rate,
                total_amount: c.total_amount,
                submission_date: c.submission_date,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.submission_date
            .cmp(&a.submission_date)
            .then(a.claim_id.cmp(&b.claim_id))
    });
    rows
}

/// `ClaimsReport_YYYYMMDD_HHMMSS.json`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("ClaimsReport_{}.json", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::domain::ClaimStatus;
    use chrono::TimeZone;

    fn claim(id: i32, user_id: i32, status: &str, submitted: (u32, u32)) -> Claim {
        Claim {
            id,
            claim_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            status: ClaimStatus::from(status),
            hours_worked: Decimal::from(10),
            hourly_rate: Decimal::from(450),
            total_amount: Decimal::from(4500),
            submission_date: Utc.with_ymd_and_hms(2024, submitted.0, submitted.1, 12, 0, 0).unwrap(),
            last_updated: None,
            status_notes: None,
            notes: None,
            user_id,
        }
    }

    fn users() -> Vec<User> {
        vec![User {
            id: 1,
            first_name: "Sizwe".to_string(),
            last_name: "Mahlangu".to_string(),
            email: "sizwe.m@university.edu".to_string(),
            contact_number: String::new(),
            hourly_rate: Decimal::from(450),
            role_id: 1,
        }]
    }

    fn claims() -> Vec<Claim> {
        vec![
            claim(1, 1, "Pending", (1, 10)),
            claim(2, 1, "Approved", (1, 20)),
            claim(3, 9, "Approved", (2, 1)),
            claim(4, 1, "Rejected", (1, 20)),
        ]
    }

    #[test]
    fn test_no_filter_returns_everything_newest_first() {
        let rows = build_report(&claims(), &users(), &ReportFilter::default());
        let ids: Vec<i32> = rows.iter().map(|r| r.claim_id).collect();

        // 2 and 4 share a submission time; the lower id comes first
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_unknown_owner_is_labelled() {
        let rows = build_report(&claims(), &users(), &ReportFilter::default());
        let orphan = rows.iter().find(|r| r.claim_id == 3).unwrap();

        assert_eq!(orphan.user_name, "Unknown User");
        assert_eq!(rows.iter().find(|r| r.claim_id == 1).unwrap().user_name, "Sizwe Mahlangu");
    }

    #[test]
    fn test_status_filter_is_case_insensitive() {
        let filter = ReportFilter {
            status: Some("approved".to_string()),
            ..Default::default()
        };
        let ids: Vec<i32> = build_report(&claims(), &users(), &filter)
            .iter()
            .map(|r| r.claim_id)
            .collect();

        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = ReportFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 20),
            ..Default::default()
        };
        let ids: Vec<i32> = build_report(&claims(), &users(), &filter)
            .iter()
            .map(|r| r.claim_id)
            .collect();

        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn test_user_filter_ignores_non_positive_ids() {
        let all = ReportFilter { user_id: Some(0), ..Default::default() };
        assert_eq!(build_report(&claims(), &users(), &all).len(), 4);

        let one = ReportFilter { user_id: Some(9), ..Default::default() };
        assert_eq!(build_report(&claims(), &users(), &one).len(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(export_file_name(at), "ClaimsReport_20240307_140509.json");
    }
}
