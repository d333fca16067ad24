use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::services::ClaimReportRow;

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ClaimsReport {
    pub generated_at: DateTime<Utc>,
    pub row_count: u32,
    pub rows: Vec<ClaimReportRow>,
}
