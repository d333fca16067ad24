use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::LecturerCoordinator;
use crate::types::dto::claim::{ClaimCreatedResponse, ClaimView};
use crate::types::dto::dashboard::{LecturerDashboard, SubmitClaimDefaults, SubmitClaimRequest};
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct LecturerApi {
    coordinator: LecturerCoordinator,
}

impl LecturerApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: LecturerCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum LecturerTags {
    /// Lecturer self-service
    Lecturer,
}

#[OpenApi]
impl LecturerApi {
    /// Own claims plus this month's hours against the cap
    #[oai(path = "/Lecturer/Dashboard/:id", method = "get", tag = "LecturerTags::Lecturer")]
    async fn dashboard(&self, req: &Request, id: Path<i32>) -> ApiResult<Json<LecturerDashboard>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.coordinator.dashboard(&ctx, id.0).await?))
    }

    /// Submission defaults; 400 when the current month is already full
    #[oai(path = "/Lecturer/SubmitClaim/:id", method = "get", tag = "LecturerTags::Lecturer")]
    async fn submit_form(&self, req: &Request, id: Path<i32>) -> ApiResult<Json<SubmitClaimDefaults>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.coordinator.submit_form(&ctx, id.0).await?))
    }

    /// Submit a claim at the lecturer's own hourly rate
    #[oai(path = "/Lecturer/SubmitClaim", method = "post", tag = "LecturerTags::Lecturer")]
    async fn submit(&self, req: &Request, body: Json<SubmitClaimRequest>) -> ApiResult<ClaimCreatedResponse> {
        let ctx = RequestContext::from_request(req);
        let claim = self.coordinator.submit(&ctx, body.0).await?;
        let location = format!("/api/Claim/{}", claim.id);
        Ok(ClaimCreatedResponse::Created(Json(claim), location))
    }

    #[oai(path = "/Lecturer/MyClaims/:id", method = "get", tag = "LecturerTags::Lecturer")]
    async fn my_claims(&self, req: &Request, id: Path<i32>) -> ApiResult<Json<Vec<ClaimView>>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.coordinator.my_claims(&ctx, id.0).await?))
    }
}
