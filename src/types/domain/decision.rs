use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClaimStatus;

/// Immutable log entry written for every status decision on a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDecision {
    pub id: i32,
    pub claim_id: i32,
    pub decision: ClaimStatus,
    #[serde(default)]
    pub comments: Option<String>,
    pub decided_by: i32,
    pub decided_at: DateTime<Utc>,
}
