// Coordinators layer - Workflow orchestration
//
// Coordinators compose store operations and service rules for specific API
// endpoints. Each one is built from Arc<AppData> and holds only the stores it uses.

pub mod approval_coordinator;
pub mod claim_coordinator;
pub mod dashboard_coordinator;
pub mod decision_workflow;
pub mod document_coordinator;
pub mod lecturer_coordinator;
pub mod report_coordinator;
pub mod role_coordinator;
pub mod tracking_coordinator;
pub mod user_coordinator;

pub use approval_coordinator::ApprovalCoordinator;
pub use claim_coordinator::ClaimCoordinator;
pub use dashboard_coordinator::DashboardCoordinator;
pub use decision_workflow::DecisionWorkflow;
pub use document_coordinator::{DocumentCoordinator, IncomingFile};
pub use lecturer_coordinator::LecturerCoordinator;
pub use report_coordinator::{ReportCoordinator, ReportExport};
pub use role_coordinator::RoleCoordinator;
pub use tracking_coordinator::TrackingCoordinator;
pub use user_coordinator::UserCoordinator;
