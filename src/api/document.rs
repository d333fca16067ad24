use std::sync::Arc;

use poem::Request;
use poem_openapi::payload::{Attachment, AttachmentType, Json};
use poem_openapi::{param::Path, OpenApi, Tags};

use crate::api::{read_upload, ApiResult};
use crate::coordinators::DocumentCoordinator;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::document::{DocumentUploadedResponse, DocumentView, UploadDocumentForm, UploadFormOptions};
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct DocumentApi {
    coordinator: DocumentCoordinator,
}

impl DocumentApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: DocumentCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum DocumentTags {
    /// Supporting documents
    Documents,
}

#[OpenApi]
impl DocumentApi {
    #[oai(path = "/SupportingDocument", method = "get", tag = "DocumentTags::Documents")]
    async fn index(&self) -> ApiResult<Json<Vec<DocumentView>>> {
        Ok(Json(self.coordinator.list().await?))
    }

    /// Claim choices and limits for the upload form
    #[oai(path = "/SupportingDocument/Upload", method = "get", tag = "DocumentTags::Documents")]
    async fn upload_form(&self) -> ApiResult<Json<UploadFormOptions>> {
        Ok(Json(self.coordinator.upload_form().await?))
    }

    #[oai(path = "/SupportingDocument/UploadFile", method = "post", tag = "DocumentTags::Documents")]
    async fn upload_file(&self, req: &Request, form: UploadDocumentForm) -> ApiResult<DocumentUploadedResponse> {
        let ctx = RequestContext::from_request(req);
        let claim_id = form.claim_id;
        let file = read_upload(form.file).await?;
        let document = self.coordinator.upload(&ctx, file, claim_id).await?;
        let location = format!("/api/SupportingDocument/{}", document.id);
        Ok(DocumentUploadedResponse::Created(Json(document), location))
    }

    #[oai(path = "/SupportingDocument/GetDocumentsForClaim/:claim_id", method = "get", tag = "DocumentTags::Documents")]
    async fn documents_for_claim(&self, claim_id: Path<i32>) -> ApiResult<Json<Vec<DocumentView>>> {
        Ok(Json(self.coordinator.for_claim(claim_id.0).await?))
    }

    #[oai(path = "/SupportingDocument/Download/:id", method = "get", tag = "DocumentTags::Documents")]
    async fn download(&self, id: Path<i32>) -> ApiResult<Attachment<Vec<u8>>> {
        let (document, bytes) = self.coordinator.download(id.0).await?;
        Ok(Attachment::new(bytes)
            .attachment_type(AttachmentType::Attachment)
            .filename(document.file_name))
    }

    /// Remove the stored file and its record
    #[oai(path = "/SupportingDocument/Delete/:id", method = "post", tag = "DocumentTags::Documents")]
    async fn delete(&self, req: &Request, id: Path<i32>) -> ApiResult<Json<MessageResponse>> {
        let ctx = RequestContext::from_request(req);
        let document = self.coordinator.delete(&ctx, id.0).await?;
        Ok(Json(MessageResponse {
            message: format!("Document '{}' deleted successfully.", document.file_name),
        }))
    }

    #[oai(path = "/SupportingDocument/:id", method = "get", tag = "DocumentTags::Documents")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<DocumentView>> {
        Ok(Json(self.coordinator.get(id.0).await?))
    }
}
