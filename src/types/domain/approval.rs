use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roster entry for a claim that is currently approved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub id: i32,
    pub approval_date: DateTime<Utc>,
    #[serde(default)]
    pub comments: String,
    pub claim_id: i32,
    pub approver_id: i32,
}
