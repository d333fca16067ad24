use chrono::NaiveDate;
use poem_openapi::Object;
use rust_decimal::Decimal;

use super::approval::ApprovalView;
use super::claim::ClaimView;
use super::user::UserView;

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct CoordinatorDashboard {
    pub total_claims: u32,
    pub pending_count: u32,
    pub approved_count: u32,
    pub rejected_count: u32,
    /// Claims awaiting review, newest submission first
    pub pending_claims: Vec<ClaimView>,
    /// Five most recent submissions in any status
    pub recent_claims: Vec<ClaimView>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ManagerDashboard {
    pub total_claims: u32,
    pub pending_count: u32,
    pub processing_count: u32,
    /// Completed and approved claims together
    pub completed_count: u32,
    pub rejected_count: u32,
    pub all_claims: Vec<ClaimView>,
    pub recent_approvals: Vec<ApprovalView>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct HrDashboard {
    pub total_users: u32,
    pub total_claims: u32,
    pub pending_count: u32,
    pub approved_count: u32,
    pub rejected_count: u32,
    pub processing_count: u32,
    pub approved_amount: Decimal,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct HomeSummary {
    pub total_users: u32,
    pub total_claims: u32,
    pub pending_count: u32,
    pub approved_count: u32,
    pub rejected_count: u32,
}

/// Hours a lecturer has used in one month
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct MonthlyHours {
    pub used: Decimal,
    pub cap: Decimal,
    pub remaining: Decimal,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct LecturerDashboard {
    pub lecturer: UserView,
    pub monthly_hours: MonthlyHours,
    pub claims: Vec<ClaimView>,
}

/// Defaults for the lecturer submission form
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SubmitClaimDefaults {
    pub user_id: i32,
    pub claim_date: NaiveDate,
    pub hourly_rate: Decimal,
    pub monthly_hours: MonthlyHours,
}

/// Lecturer submission; the rate always comes from the lecturer record
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SubmitClaimRequest {
    pub user_id: i32,
    pub claim_date: NaiveDate,
    pub hours_worked: Decimal,
    pub notes: Option<String>,
}
