use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{action_result, read_upload, ApiResult};
use crate::coordinators::{ClaimCoordinator, DocumentCoordinator};
use crate::types::dto::claim::{ClaimCreatedResponse, ClaimForm, ClaimFormOptions, ClaimView, DecisionComment};
use crate::types::dto::common::ActionResult;
use crate::types::dto::document::{DocumentUploadedResponse, UploadDocumentForm};
use crate::types::internal::RequestContext;
use crate::AppData;

/// Claim endpoints
pub struct ClaimApi {
    claims: ClaimCoordinator,
    documents: DocumentCoordinator,
}

impl ClaimApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: ClaimCoordinator::new(app_data.clone()),
            documents: DocumentCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ClaimTags {
    /// Claim submission and maintenance
    Claims,
}

#[OpenApi]
impl ClaimApi {
    /// List every claim, newest submission first
    #[oai(path = "/Claim", method = "get", tag = "ClaimTags::Claims")]
    async fn index(&self) -> ApiResult<Json<Vec<ClaimView>>> {
        Ok(Json(self.claims.list().await?))
    }

    /// Form defaults for a new claim
    #[oai(path = "/Claim/Create", method = "get", tag = "ClaimTags::Claims")]
    async fn create_form(&self) -> ApiResult<Json<ClaimFormOptions>> {
        Ok(Json(self.claims.create_form().await?))
    }

    /// Submit a claim; it starts out Pending
    #[oai(path = "/Claim/Create", method = "post", tag = "ClaimTags::Claims")]
    async fn create(&self, req: &Request, body: Json<ClaimForm>) -> ApiResult<ClaimCreatedResponse> {
        let ctx = RequestContext::from_request(req);
        let claim = self.claims.create(&ctx, body.0).await?;
        let location = format!("/api/Claim/{}", claim.id);
        Ok(ClaimCreatedResponse::Created(Json(claim), location))
    }

    #[oai(path = "/Claim/Edit/:id", method = "get", tag = "ClaimTags::Claims")]
    async fn edit_form(&self, id: Path<i32>) -> ApiResult<Json<ClaimView>> {
        Ok(Json(self.claims.get(id.0).await?))
    }

    /// Update a claim; the total is recomputed
    #[oai(path = "/Claim/Edit/:id", method = "post", tag = "ClaimTags::Claims")]
    async fn edit(&self, req: &Request, id: Path<i32>, body: Json<ClaimForm>) -> ApiResult<Json<ClaimView>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.claims.edit(&ctx, id.0, body.0).await?))
    }

    /// Approve straight from the claim detail page
    #[oai(path = "/Claim/Approve/:id", method = "post", tag = "ClaimTags::Claims")]
    async fn approve(&self, req: &Request, id: Path<i32>, body: Json<DecisionComment>) -> Json<ActionResult> {
        let ctx = RequestContext::from_request(req);
        let result = self.claims.approve(&ctx, id.0, body.0.comments).await;
        Json(action_result(
            result,
            id.0,
            format!("Claim #{} has been approved successfully!", id.0),
            "An error occurred while approving the claim.",
        ))
    }

    /// Attach a document (images allowed) to a claim
    #[oai(path = "/Claim/Documents/:id", method = "post", tag = "ClaimTags::Claims")]
    async fn attach_document(
        &self,
        req: &Request,
        id: Path<i32>,
        form: UploadDocumentForm,
    ) -> ApiResult<DocumentUploadedResponse> {
        let ctx = RequestContext::from_request(req);
        let file = read_upload(form.file).await?;
        let document = self.documents.attach_to_claim(&ctx, id.0, file).await?;
        let location = format!("/api/SupportingDocument/{}", document.id);
        Ok(DocumentUploadedResponse::Created(Json(document), location))
    }

    #[oai(path = "/Claim/:id", method = "get", tag = "ClaimTags::Claims")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<ClaimView>> {
        Ok(Json(self.claims.get(id.0).await?))
    }
}
