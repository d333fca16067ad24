use crate::errors::internal::InternalError;
use crate::types::internal::EntityKind;
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error body for failed requests
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Request field the message refers to
    pub field: Option<String>,
}

/// Error outcomes shared by every endpoint
///
/// A missing record never surfaces as a 404: the client is sent back to the
/// entity's listing with the message carried in `X-Flash-Error`.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Submitted values failed validation; nothing was persisted
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Record not found; redirect to the listing it belongs to
    #[oai(status = 303)]
    NotFound(
        #[oai(header = "Location")] String,
        #[oai(header = "X-Flash-Error")] String,
    ),

    /// Storage or other unexpected failure
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        ApiError::Validation(Json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: message.into(),
            status_code: 400,
            field: field.map(str::to_string),
        }))
    }

    /// Create a redirect to `location` carrying a flash message
    pub fn redirect(location: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::NotFound(location.into(), message.into())
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Validation(validation) => {
                tracing::debug!("Validation failed: {}", validation);
                Self::validation(validation.to_string(), validation.field())
            }
            InternalError::NotFound { entity, id } => {
                tracing::debug!("{} {} not found, redirecting to listing", entity, id);
                Self::redirect(entity.index_path(), err.to_string())
            }
            InternalError::StoredFileMissing { .. } => {
                tracing::warn!("{}", err);
                Self::redirect(EntityKind::Document.index_path(), err.to_string())
            }
            InternalError::Database(_) | InternalError::Storage(_) => {
                tracing::error!("Persistence failure: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal server error without internal details
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An error occurred".to_string(),
            status_code: 500,
            field: None,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(json) => json.0.message.clone(),
            ApiError::NotFound(_, message) => message.clone(),
            ApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
