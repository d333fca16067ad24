use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDocument {
    pub id: i32,
    pub file_name: String,
    /// Public path under the upload root, e.g. `/uploads/documents/<uuid>.pdf`
    pub file_path: String,
    pub file_size: i64,
    pub content_type: String,
    pub upload_date: DateTime<Utc>,
    /// `None` while the document is unassigned
    #[serde(default)]
    pub claim_id: Option<i32>,
}
