use chrono::{DateTime, Utc};
use poem_openapi::Object;
use rust_decimal::Decimal;

use crate::types::domain::{Approval, Claim, ClaimDecision};

/// Roster entry joined with the claim it approves
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ApprovalView {
    pub id: i32,
    pub approval_date: DateTime<Utc>,
    pub comments: String,
    pub claim_id: i32,
    pub approver_id: i32,
    pub claim_total: Option<Decimal>,
    pub claim_status: Option<String>,
}

impl ApprovalView {
    pub fn new(approval: Approval, claim: Option<&Claim>) -> Self {
        Self {
            id: approval.id,
            approval_date: approval.approval_date,
            comments: approval.comments,
            claim_id: approval.claim_id,
            approver_id: approval.approver_id,
            claim_total: claim.map(|c| c.total_amount),
            claim_status: claim.map(|c| c.status.as_str().to_string()),
        }
    }
}

/// `POST /Approval/ApproveClaim` and `/Approval/RejectClaim` body
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ClaimDecisionRequest {
    pub claim_id: i32,
    pub comments: Option<String>,
    /// Defaults to the configured approver
    pub approver_id: Option<i32>,
}

/// Approval edit form; only the comments can change
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ApprovalEditForm {
    pub comments: Option<String>,
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct DecisionView {
    pub id: i32,
    pub claim_id: i32,
    pub decision: String,
    pub comments: Option<String>,
    pub decided_by: i32,
    pub decided_at: DateTime<Utc>,
}

impl From<ClaimDecision> for DecisionView {
    fn from(decision: ClaimDecision) -> Self {
        Self {
            id: decision.id,
            claim_id: decision.claim_id,
            decision: decision.decision.as_str().to_string(),
            comments: decision.comments,
            decided_by: decision.decided_by,
            decided_at: decision.decided_at,
        }
    }
}
