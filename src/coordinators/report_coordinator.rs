use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::{InternalError, StorageError};
use crate::services::report_builder::{build_report, export_file_name};
use crate::services::ReportFilter;
use crate::stores::EntityStore;
use crate::types::domain::{Claim, User};
use crate::types::dto::report::ClaimsReport;
use crate::types::internal::RequestContext;

/// Serialized report ready for download
#[derive(Debug, Clone)]
pub struct ReportExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub row_count: usize,
}

/// HR claim reports
pub struct ReportCoordinator {
    claims: Arc<EntityStore<Claim>>,
    users: Arc<EntityStore<User>>,
}

impl ReportCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: app_data.claims.clone(),
            users: app_data.users.clone(),
        }
    }

    pub async fn generate(&self, ctx: &RequestContext, filter: &ReportFilter) -> Result<ClaimsReport, InternalError> {
        let claims = self.claims.all().await?;
        let users = self.users.all().await?;
        let rows = build_report(&claims, &users, filter);

        tracing::debug!(request_id = %ctx.request_id, rows = rows.len(), "Generated claims report");

        Ok(ClaimsReport {
            generated_at: Utc::now(),
            row_count: rows.len() as u32,
            rows,
        })
    }

    /// Report rows as a pretty-printed JSON array named `ClaimsReport_<timestamp>.json`
    pub async fn export(&self, ctx: &RequestContext, filter: &ReportFilter) -> Result<ReportExport, InternalError> {
        let claims = self.claims.all().await?;
        let users = self.users.all().await?;
        let rows = build_report(&claims, &users, filter);

        let bytes = serde_json::to_vec_pretty(&rows).map_err(|source| StorageError::Serialization {
            collection: "report".to_string(),
            source,
        })?;

        let export = ReportExport {
            file_name: export_file_name(Utc::now()),
            bytes,
            row_count: rows.len(),
        };
        tracing::info!(
            request_id = %ctx.request_id,
            file = %export.file_name,
            rows = export.row_count,
            "Exported claims report"
        );
        Ok(export)
    }

    /// Export into `target`: a directory receives the timestamped file name,
    /// anything else is used as the file path
    pub async fn export_to(
        &self,
        ctx: &RequestContext,
        filter: &ReportFilter,
        target: &Path,
    ) -> Result<(PathBuf, usize), InternalError> {
        let export = self.export(ctx, filter).await?;
        let path = if target.is_dir() {
            target.join(&export.file_name)
        } else {
            target.to_path_buf()
        };

        tokio::fs::write(&path, &export.bytes)
            .await
            .map_err(|e| InternalError::io("write report", &path, e))?;
        Ok((path, export.row_count))
    }
}
