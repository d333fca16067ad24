use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::TrackingCoordinator;
use crate::types::dto::claim::ClaimView;
use crate::types::dto::tracking::{ClaimStatusSnapshot, UpdateStatusRequest, UpdateStatusResult};
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct TrackingApi {
    coordinator: TrackingCoordinator,
}

impl TrackingApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: TrackingCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum TrackingTags {
    /// Claim status tracking
    Tracking,
}

#[OpenApi]
impl TrackingApi {
    #[oai(path = "/Tracking", method = "get", tag = "TrackingTags::Tracking")]
    async fn index(&self) -> ApiResult<Json<Vec<ClaimView>>> {
        Ok(Json(self.coordinator.list().await?))
    }

    #[oai(path = "/Tracking/Details/:id", method = "get", tag = "TrackingTags::Tracking")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<ClaimView>> {
        Ok(Json(self.coordinator.details(id.0).await?))
    }

    #[oai(path = "/Tracking/GetClaimStatus/:claim_id", method = "get", tag = "TrackingTags::Tracking")]
    async fn claim_status(&self, claim_id: Path<i32>) -> ApiResult<Json<ClaimStatusSnapshot>> {
        Ok(Json(self.coordinator.status(claim_id.0).await?))
    }

    /// Set any status, including the payment track
    #[oai(path = "/Tracking/UpdateStatus", method = "post", tag = "TrackingTags::Tracking")]
    async fn update_status(&self, req: &Request, body: Json<UpdateStatusRequest>) -> Json<UpdateStatusResult> {
        let ctx = RequestContext::from_request(req);
        let UpdateStatusRequest { claim_id, new_status, notes } = body.0;

        let result = match self
            .coordinator
            .update_status(&ctx, claim_id, &new_status, notes)
            .await
        {
            Ok(claim) => UpdateStatusResult {
                success: true,
                message: format!("Claim status updated to {}", claim.status),
                status_display_name: Some(claim.status.display_name().to_string()),
                status_badge_class: Some(claim.status.badge_class().as_str().to_string()),
                status_progress: Some(claim.status.progress()),
            },
            Err(err) => {
                let message = if err.is_not_found() {
                    "Claim not found".to_string()
                } else {
                    tracing::error!(request_id = %ctx.request_id, claim_id, "Status update failed: {}", err);
                    "An error occurred while updating the status.".to_string()
                };
                UpdateStatusResult {
                    success: false,
                    message,
                    status_display_name: None,
                    status_badge_class: None,
                    status_progress: None,
                }
            }
        };
        Json(result)
    }
}
