use std::path::Path;
use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::ReportCoordinator;
use crate::services::ReportFilter;
use crate::types::internal::RequestContext;

/// Export the filtered claims report to `output`
pub async fn export_report(
    app_data: AppData,
    filter: ReportFilter,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("export_report");
    let reports = ReportCoordinator::new(Arc::new(app_data));

    let (path, rows) = reports.export_to(&ctx, &filter, output).await?;

    println!("✓ Exported {} claims to {}", rows, path.display());
    Ok(())
}
