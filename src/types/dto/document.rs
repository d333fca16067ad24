use chrono::{DateTime, Utc};
use poem_openapi::{payload::Json, types::multipart::Upload, ApiResponse, Multipart, Object};

use crate::types::domain::{Claim, SupportingDocument};

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: i32,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub content_type: String,
    pub upload_date: DateTime<Utc>,
    pub claim_id: Option<i32>,
}

impl From<SupportingDocument> for DocumentView {
    fn from(document: SupportingDocument) -> Self {
        Self {
            id: document.id,
            file_name: document.file_name,
            file_path: document.file_path,
            file_size: document.file_size,
            content_type: document.content_type,
            upload_date: document.upload_date,
            claim_id: document.claim_id,
        }
    }
}

/// Claim a document can be attached to; `claimId` is absent for "Unassigned"
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ClaimChoice {
    pub claim_id: Option<i32>,
    pub label: String,
}

impl ClaimChoice {
    pub fn unassigned() -> Self {
        Self {
            claim_id: None,
            label: "Unassigned".to_string(),
        }
    }

    pub fn for_claim(claim: &Claim) -> Self {
        Self {
            claim_id: Some(claim.id),
            label: format!("Claim #{} - {}", claim.id, claim.claim_date.format("%Y-%m-%d")),
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UploadFormOptions {
    pub claims: Vec<ClaimChoice>,
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
}

/// Multipart body for the document upload endpoints
#[derive(Multipart)]
#[oai(rename_all = "camelCase")]
pub struct UploadDocumentForm {
    pub file: Upload,
    /// Claim to attach to; ignored on the claim attachment route
    pub claim_id: Option<i32>,
}

#[derive(ApiResponse)]
pub enum DocumentUploadedResponse {
    #[oai(status = 201)]
    Created(Json<DocumentView>, #[oai(header = "Location")] String),
}
