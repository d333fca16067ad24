use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::DashboardCoordinator;
use crate::types::dto::dashboard::{CoordinatorDashboard, HomeSummary, ManagerDashboard};
use crate::AppData;

pub struct DashboardApi {
    coordinator: DashboardCoordinator,
}

impl DashboardApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: DashboardCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum DashboardTags {
    /// Aggregated views per role
    Dashboards,
}

#[OpenApi]
impl DashboardApi {
    #[oai(path = "/Home", method = "get", tag = "DashboardTags::Dashboards")]
    async fn home(&self) -> ApiResult<Json<HomeSummary>> {
        Ok(Json(self.coordinator.home().await?))
    }

    #[oai(path = "/Coordinator/Dashboard", method = "get", tag = "DashboardTags::Dashboards")]
    async fn coordinator(&self) -> ApiResult<Json<CoordinatorDashboard>> {
        Ok(Json(self.coordinator.coordinator().await?))
    }

    #[oai(path = "/Manager/Dashboard", method = "get", tag = "DashboardTags::Dashboards")]
    async fn manager(&self) -> ApiResult<Json<ManagerDashboard>> {
        Ok(Json(self.coordinator.manager().await?))
    }
}
