use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Outcome of an action invoked from a listing (approve, reject, status update)
///
/// Always sent with HTTP 200; `success` carries the outcome.
#[derive(Object, Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Confirmation for form posts that succeeded
#[derive(Object, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}
