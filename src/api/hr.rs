use std::sync::Arc;

use chrono::NaiveDate;
use poem::Request;
use poem_openapi::payload::{Attachment, AttachmentType, Json};
use poem_openapi::{param::Query, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::{DashboardCoordinator, ReportCoordinator};
use crate::services::ReportFilter;
use crate::types::dto::dashboard::HrDashboard;
use crate::types::dto::report::ClaimsReport;
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct HrApi {
    dashboards: DashboardCoordinator,
    reports: ReportCoordinator,
}

impl HrApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            dashboards: DashboardCoordinator::new(app_data.clone()),
            reports: ReportCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum HrTags {
    /// HR overview and claim reports
    Hr,
}

#[OpenApi]
impl HrApi {
    #[oai(path = "/HR", method = "get", tag = "HrTags::Hr")]
    async fn index(&self) -> ApiResult<Json<HrDashboard>> {
        Ok(Json(self.dashboards.hr().await?))
    }

    /// Claims matching every supplied filter, newest submission first
    #[oai(path = "/HR/GenerateReport", method = "get", tag = "HrTags::Hr")]
    async fn generate_report(
        &self,
        req: &Request,
        #[oai(name = "userId")] user_id: Query<Option<i32>>,
        status: Query<Option<String>>,
        #[oai(name = "startDate")] start_date: Query<Option<NaiveDate>>,
        #[oai(name = "endDate")] end_date: Query<Option<NaiveDate>>,
    ) -> ApiResult<Json<ClaimsReport>> {
        let ctx = RequestContext::from_request(req);
        let filter = ReportFilter {
            user_id: user_id.0,
            status: status.0,
            start_date: start_date.0,
            end_date: end_date.0,
        };
        Ok(Json(self.reports.generate(&ctx, &filter).await?))
    }

    /// Same rows as a downloadable JSON file
    #[oai(path = "/HR/ExportReport", method = "get", tag = "HrTags::Hr")]
    async fn export_report(
        &self,
        req: &Request,
        #[oai(name = "userId")] user_id: Query<Option<i32>>,
        status: Query<Option<String>>,
        #[oai(name = "startDate")] start_date: Query<Option<NaiveDate>>,
        #[oai(name = "endDate")] end_date: Query<Option<NaiveDate>>,
    ) -> ApiResult<Attachment<Vec<u8>>> {
        let ctx = RequestContext::from_request(req);
        let filter = ReportFilter {
            user_id: user_id.0,
            status: status.0,
            start_date: start_date.0,
            end_date: end_date.0,
        };
        let export = self.reports.export(&ctx, &filter).await?;
        Ok(Attachment::new(export.bytes)
            .attachment_type(AttachmentType::Attachment)
            .filename(export.file_name))
    }
}
