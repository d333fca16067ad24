use chrono::{DateTime, NaiveDate, Utc};
use poem_openapi::{payload::Json, ApiResponse, Object};
use rust_decimal::Decimal;

use crate::types::domain::{Claim, User};

/// Claim as shown in listings and detail pages
///
/// The `status*` presentation fields are derived from `status` on every read.
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ClaimView {
    pub id: i32,
    pub claim_date: NaiveDate,
    /// Stored status; empty when unset
    pub status: String,
    pub status_display_name: String,
    pub status_badge_class: String,
    pub status_progress: u8,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub submission_date: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
    pub status_notes: Option<String>,
    pub notes: Option<String>,
    pub user_id: i32,
    /// Owner's display name when the user exists
    pub user_name: Option<String>,
}

impl ClaimView {
    pub fn new(claim: Claim, owner: Option<&User>) -> Self {
        Self {
            id: claim.id,
            claim_date: claim.claim_date,
            status: claim.status.as_str().to_string(),
            status_display_name: claim.status.display_name().to_string(),
            status_badge_class: claim.status.badge_class().as_str().to_string(),
            status_progress: claim.status.progress(),
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            total_amount: claim.total_amount,
            submission_date: claim.submission_date,
            last_updated: claim.last_updated,
            status_notes: claim.status_notes,
            notes: claim.notes,
            user_id: claim.user_id,
            user_name: owner.map(User::display_name),
        }
    }

    /// Join every claim with its owner from `users`
    pub fn with_owners(claims: Vec<Claim>, users: &[User]) -> Vec<Self> {
        claims
            .into_iter()
            .map(|claim| {
                let owner = users.iter().find(|u| u.id == claim.user_id);
                Self::new(claim, owner)
            })
            .collect()
    }
}

/// Create / edit payload for a claim
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ClaimForm {
    pub claim_date: NaiveDate,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub user_id: i32,
    pub notes: Option<String>,
    /// Only honoured on edit; blank keeps the current status
    pub status: Option<String>,
}

/// Choice offered in a user drop-down
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserOption {
    pub id: i32,
    pub name: String,
}

impl From<&User> for UserOption {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.display_name(),
        }
    }
}

/// Defaults and choices for the claim create form
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ClaimFormOptions {
    pub claim_date: NaiveDate,
    pub users: Vec<UserOption>,
}

/// Optional reviewer comment attached to a decision
#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct DecisionComment {
    pub comments: Option<String>,
}

#[derive(ApiResponse)]
pub enum ClaimCreatedResponse {
    /// Claim stored with status Pending
    #[oai(status = 201)]
    Created(Json<ClaimView>, #[oai(header = "Location")] String),
}
