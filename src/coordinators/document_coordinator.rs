use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::upload_policy::{content_type_for, extension_of, DOCUMENT_EXTENSIONS};
use crate::services::UploadPolicy;
use crate::stores::EntityStore;
use crate::types::domain::{Claim, SupportingDocument};
use crate::types::dto::document::{ClaimChoice, DocumentView, UploadFormOptions};
use crate::types::internal::RequestContext;

/// Public prefix of stored documents; also the path below `UPLOAD_DIR`
const DOCUMENTS_PREFIX: &str = "/uploads/documents";

/// File received from a multipart form
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Supporting document uploads stored as `<uuid><ext>` on disk
pub struct DocumentCoordinator {
    documents: Arc<EntityStore<SupportingDocument>>,
    claims: Arc<EntityStore<Claim>>,
    upload_root: PathBuf,
    max_upload_bytes: u64,
}

impl DocumentCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            documents: app_data.documents.clone(),
            claims: app_data.claims.clone(),
            upload_root: app_data.settings.upload_dir().to_path_buf(),
            max_upload_bytes: app_data.settings.max_upload_bytes(),
        }
    }

    /// Newest upload first
    pub async fn list(&self) -> Result<Vec<DocumentView>, InternalError> {
        let mut documents = self.documents.all().await?;
        documents.sort_by(|a, b| b.upload_date.cmp(&a.upload_date).then(a.id.cmp(&b.id)));
        Ok(documents.into_iter().map(DocumentView::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<DocumentView, InternalError> {
        Ok(self.documents.get(id).await?.into())
    }

    pub async fn for_claim(&self, claim_id: i32) -> Result<Vec<DocumentView>, InternalError> {
        let mut documents = self
            .documents
            .filter(|d| d.claim_id == Some(claim_id))
            .await?;
        documents.sort_by_key(|d| d.id);
        Ok(documents.into_iter().map(DocumentView::from).collect())
    }

    pub async fn upload_form(&self) -> Result<UploadFormOptions, InternalError> {
        let mut claims = self.claims.all().await?;
        claims.sort_by_key(|c| c.id);

        let policy = UploadPolicy::documents(self.max_upload_bytes);
        let mut choices = vec![ClaimChoice::unassigned()];
        choices.extend(claims.iter().map(ClaimChoice::for_claim));

        Ok(UploadFormOptions {
            claims: choices,
            allowed_extensions: DOCUMENT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_bytes: policy.max_bytes(),
        })
    }

    /// Store a document from the documents page; non-positive claim ids mean unassigned
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        file: IncomingFile,
        claim_id: Option<i32>,
    ) -> Result<DocumentView, InternalError> {
        let policy = UploadPolicy::documents(self.max_upload_bytes);
        let claim_id = claim_id.filter(|id| *id > 0);
        if let Some(claim_id) = claim_id {
            self.claims.get(claim_id).await?;
        }
        self.store(ctx, &policy, file, claim_id).await
    }

    /// Attach a file to an existing claim; images are accepted here
    pub async fn attach_to_claim(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        file: IncomingFile,
    ) -> Result<DocumentView, InternalError> {
        self.claims.get(claim_id).await?;
        let policy = UploadPolicy::claim_attachments(self.max_upload_bytes);
        self.store(ctx, &policy, file, Some(claim_id)).await
    }

    /// Stored bytes of a document together with its record
    pub async fn download(&self, id: i32) -> Result<(DocumentView, Vec<u8>), InternalError> {
        let document = self.documents.get(id).await?;
        let path = self.disk_path(&document.file_path);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok((document.into(), bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(InternalError::StoredFileMissing {
                    file_name: document.file_name,
                })
            }
            Err(err) => Err(InternalError::io("read document", &path, err)),
        }
    }

    /// Remove the record and, if still present, its file
    pub async fn delete(&self, ctx: &RequestContext, id: i32) -> Result<DocumentView, InternalError> {
        let document = self.documents.get(id).await?;
        let path = self.disk_path(&document.file_path);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Stored file {} was already missing", path.display());
            }
            Err(err) => return Err(InternalError::io("delete document", &path, err)),
        }

        let removed = self.documents.remove(id).await?;
        tracing::info!(request_id = %ctx.request_id, document_id = id, "Document deleted");
        Ok(removed.into())
    }

    async fn store(
        &self,
        ctx: &RequestContext,
        policy: &UploadPolicy,
        file: IncomingFile,
        claim_id: Option<i32>,
    ) -> Result<DocumentView, InternalError> {
        policy.check(&file.file_name, file.bytes.len() as u64)?;

        let stored_name = format!("{}{}", Uuid::new_v4(), extension_of(&file.file_name));
        let public_path = format!("{}/{}", DOCUMENTS_PREFIX, stored_name);
        let dir = self.disk_path(DOCUMENTS_PREFIX);
        let path = dir.join(&stored_name);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| InternalError::io("create upload directory", &dir, e))?;
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| InternalError::io("write document", &path, e))?;

        let content_type = file
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| content_type_for(&file.file_name).to_string());
        let file_size = file.bytes.len() as i64;
        let file_name = file.file_name;

        let inserted = self
            .documents
            .insert_with(|id| {
                Ok(SupportingDocument {
                    id,
                    file_name,
                    file_path: public_path,
                    file_size,
                    content_type,
                    upload_date: Utc::now(),
                    claim_id,
                })
            })
            .await;

        match inserted {
            Ok(document) => {
                tracing::info!(
                    request_id = %ctx.request_id,
                    document_id = document.id,
                    claim_id = ?document.claim_id,
                    "Document uploaded"
                );
                Ok(document.into())
            }
            Err(err) => {
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to remove orphaned upload {}: {}", path.display(), cleanup);
                }
                Err(err)
            }
        }
    }

    fn disk_path(&self, public_path: &str) -> PathBuf {
        self.upload_root.join(public_path.trim_start_matches('/'))
    }
}
