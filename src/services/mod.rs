// Services layer - Pure business rules with no storage access
pub mod claim_rules;
pub mod report_builder;
pub mod status_summary;
pub mod upload_policy;
pub mod user_rules;

pub use claim_rules::MonthlyAllowance;
pub use report_builder::{ClaimReportRow, ReportFilter};
pub use status_summary::StatusSummary;
pub use upload_policy::UploadPolicy;

#[cfg(test)]
mod claim_rules_test;
