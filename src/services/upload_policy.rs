use std::path::Path;

use crate::errors::ValidationError;

/// Extensions accepted on the supporting documents page
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".xlsx", ".doc", ".xls"];

/// Extensions accepted when a document is attached while submitting a claim
pub const CLAIM_ATTACHMENT_EXTENSIONS: &[&str] =
    &[".pdf", ".docx", ".xlsx", ".doc", ".xls", ".jpg", ".jpeg", ".png"];

/// Size and type rules for uploaded files
///
/// Checks run in order: empty, too large, extension.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_extensions: &'static [&'static str],
}

impl UploadPolicy {
    pub fn documents(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allowed_extensions: DOCUMENT_EXTENSIONS,
        }
    }

    pub fn claim_attachments(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allowed_extensions: CLAIM_ATTACHMENT_EXTENSIONS,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn check(&self, file_name: &str, size: u64) -> Result<(), ValidationError> {
        if size == 0 || file_name.trim().is_empty() {
            return Err(ValidationError::EmptyUpload);
        }
        if size > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                max_mb: self.max_bytes / (1024 * 1024),
            });
        }

        let extension = extension_of(file_name);
        if !self.allowed_extensions.contains(&extension.as_str()) {
            return Err(ValidationError::FileTypeNotAllowed {
                allowed: self.describe_allowed(),
            });
        }
        Ok(())
    }

    /// e.g. "PDF, DOCX, XLSX, DOC, XLS"
    fn describe_allowed(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lower-cased extension including the leading dot, or empty
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// MIME type recorded for a stored file, by extension
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_str() {
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xls" => "application/vnd.ms-excel",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        _ => "application/octet-stream",
    }
}
