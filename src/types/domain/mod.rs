// Domain records persisted by the stores
pub mod approval;
pub mod claim;
pub mod claim_status;
pub mod decision;
pub mod document;
pub mod role;
pub mod user;

pub use approval::Approval;
pub use claim::Claim;
pub use claim_status::{BadgeClass, ClaimStatus};
pub use decision::ClaimDecision;
pub use document::SupportingDocument;
pub use role::Role;
pub use user::User;
