use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::domain::Claim;

/// Status snapshot polled by the tracking page
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ClaimStatusSnapshot {
    pub claim_id: i32,
    pub status: String,
    pub status_display_name: String,
    pub status_badge_class: String,
    pub status_progress: u8,
    pub last_updated: DateTime<Utc>,
    pub status_notes: Option<String>,
}

impl From<&Claim> for ClaimStatusSnapshot {
    fn from(claim: &Claim) -> Self {
        Self {
            claim_id: claim.id,
            status: claim.status.as_str().to_string(),
            status_display_name: claim.status.display_name().to_string(),
            status_badge_class: claim.status.badge_class().as_str().to_string(),
            status_progress: claim.status.progress(),
            last_updated: claim.last_activity(),
            status_notes: claim.status_notes.clone(),
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub claim_id: i32,
    pub new_status: String,
    pub notes: Option<String>,
}

/// Result of a tracking status update
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UpdateStatusResult {
    pub success: bool,
    pub message: String,
    pub status_display_name: Option<String>,
    pub status_badge_class: Option<String>,
    pub status_progress: Option<u8>,
}
