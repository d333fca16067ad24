// API layer - HTTP endpoints
pub mod approval;
pub mod claim;
pub mod dashboard;
pub mod document;
pub mod health;
pub mod hr;
pub mod lecturer;
pub mod role;
pub mod tracking;
pub mod user;

use std::path::Path;
use std::sync::Arc;

use poem::Route;
use poem_openapi::types::multipart::Upload;
use poem_openapi::OpenApiService;

pub use approval::ApprovalApi;
pub use claim::ClaimApi;
pub use dashboard::DashboardApi;
pub use document::DocumentApi;
pub use health::HealthApi;
pub use hr::HrApi;
pub use lecturer::LecturerApi;
pub use role::RoleApi;
pub use tracking::TrackingApi;
pub use user::UserApi;

use crate::coordinators::IncomingFile;
use crate::errors::{ApiError, InternalError};
use crate::types::domain::Claim;
use crate::types::dto::common::ActionResult;
use crate::AppData;

pub type ApiResult<T> = Result<T, ApiError>;

/// Compose every endpoint under `/api` with Swagger UI at `/swagger`
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let apis = (
        HealthApi,
        DashboardApi::new(app_data.clone()),
        ClaimApi::new(app_data.clone()),
        ApprovalApi::new(app_data.clone()),
        TrackingApi::new(app_data.clone()),
        LecturerApi::new(app_data.clone()),
        UserApi::new(app_data.clone()),
        RoleApi::new(app_data.clone()),
        DocumentApi::new(app_data.clone()),
        HrApi::new(app_data),
    );

    let api_service = OpenApiService::new(apis, "Contract Monthly Claim System", env!("CARGO_PKG_VERSION"))
        .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}

/// Map a decision outcome to the `{success, message}` body the listings expect
///
/// A missing claim and an unexpected failure both answer with `success: false`;
/// only the latter is logged.
pub(crate) fn action_result(
    result: Result<Claim, InternalError>,
    claim_id: i32,
    success_message: String,
    failure_message: &str,
) -> ActionResult {
    match result {
        Ok(_) => ActionResult::ok(success_message),
        Err(err) if err.is_not_found() => ActionResult::failed(format!("Claim #{} not found.", claim_id)),
        Err(err) => {
            tracing::error!(claim_id, "Claim decision failed: {}", err);
            ActionResult::failed(failure_message)
        }
    }
}

/// Buffer a multipart upload
pub(crate) async fn read_upload(upload: Upload) -> Result<IncomingFile, InternalError> {
    let file_name = upload.file_name().unwrap_or_default().to_string();
    let content_type = upload.content_type().map(str::to_string);
    let bytes = upload
        .into_vec()
        .await
        .map_err(|e| InternalError::io("read upload", Path::new(&file_name), e))?;

    Ok(IncomingFile {
        file_name,
        content_type,
        bytes,
    })
}
