use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{action_result, ApiResult};
use crate::coordinators::ApprovalCoordinator;
use crate::types::dto::approval::{ApprovalEditForm, ApprovalView, ClaimDecisionRequest, DecisionView};
use crate::types::dto::claim::ClaimView;
use crate::types::dto::common::ActionResult;
use crate::types::internal::RequestContext;
use crate::AppData;

/// Review endpoints for coordinators and managers
pub struct ApprovalApi {
    coordinator: ApprovalCoordinator,
}

impl ApprovalApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: ApprovalCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ApprovalTags {
    /// Claim review and the approved roster
    Approvals,
}

#[OpenApi]
impl ApprovalApi {
    /// Approvals of claims that are currently approved
    #[oai(path = "/Approval", method = "get", tag = "ApprovalTags::Approvals")]
    async fn index(&self, req: &Request) -> ApiResult<Json<Vec<ApprovalView>>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.coordinator.list(&ctx).await?))
    }

    /// Every claim, for review
    #[oai(path = "/Approval/PendingClaims", method = "get", tag = "ApprovalTags::Approvals")]
    async fn pending_claims(&self) -> ApiResult<Json<Vec<ClaimView>>> {
        Ok(Json(self.coordinator.pending_claims().await?))
    }

    #[oai(path = "/Approval/ProcessApproval/:claim_id", method = "get", tag = "ApprovalTags::Approvals")]
    async fn process_approval(&self, claim_id: Path<i32>) -> ApiResult<Json<ClaimView>> {
        Ok(Json(self.coordinator.process_approval(claim_id.0).await?))
    }

    #[oai(path = "/Approval/ApproveClaim", method = "post", tag = "ApprovalTags::Approvals")]
    async fn approve_claim(&self, req: &Request, body: Json<ClaimDecisionRequest>) -> Json<ActionResult> {
        let ctx = RequestContext::from_request(req);
        let ClaimDecisionRequest { claim_id, comments, approver_id } = body.0;
        let result = self.coordinator.approve(&ctx, claim_id, comments, approver_id).await;
        Json(action_result(
            result,
            claim_id,
            format!("Claim #{} has been approved successfully!", claim_id),
            "An error occurred while approving the claim.",
        ))
    }

    #[oai(path = "/Approval/RejectClaim", method = "post", tag = "ApprovalTags::Approvals")]
    async fn reject_claim(&self, req: &Request, body: Json<ClaimDecisionRequest>) -> Json<ActionResult> {
        let ctx = RequestContext::from_request(req);
        let ClaimDecisionRequest { claim_id, comments, approver_id } = body.0;
        let result = self.coordinator.reject(&ctx, claim_id, comments, approver_id).await;
        Json(action_result(
            result,
            claim_id,
            format!("Claim #{} has been rejected.", claim_id),
            "An error occurred while rejecting the claim.",
        ))
    }

    #[oai(path = "/Approval/Edit/:id", method = "get", tag = "ApprovalTags::Approvals")]
    async fn edit_form(&self, id: Path<i32>) -> ApiResult<Json<ApprovalView>> {
        Ok(Json(self.coordinator.get(id.0).await?))
    }

    /// Update the comments of an approval
    #[oai(path = "/Approval/Edit/:id", method = "post", tag = "ApprovalTags::Approvals")]
    async fn edit(&self, req: &Request, id: Path<i32>, body: Json<ApprovalEditForm>) -> ApiResult<Json<ApprovalView>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.coordinator.edit(&ctx, id.0, body.0.comments).await?))
    }

    /// Every decision recorded for a claim, oldest first
    #[oai(path = "/Approval/History/:claim_id", method = "get", tag = "ApprovalTags::Approvals")]
    async fn history(&self, claim_id: Path<i32>) -> ApiResult<Json<Vec<DecisionView>>> {
        Ok(Json(self.coordinator.history(claim_id.0).await?))
    }

    #[oai(path = "/Approval/:id", method = "get", tag = "ApprovalTags::Approvals")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<ApprovalView>> {
        Ok(Json(self.coordinator.get(id.0).await?))
    }
}
