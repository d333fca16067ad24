use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::RoleCoordinator;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{RoleCreatedResponse, RoleForm, RoleView};
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct RoleApi {
    role_coordinator: RoleCoordinator,
}

impl RoleApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            role_coordinator: RoleCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum RoleTags {
    /// Role administration
    Roles,
}

#[OpenApi]
impl RoleApi {
    #[oai(path = "/Role", method = "get", tag = "RoleTags::Roles")]
    async fn index(&self) -> ApiResult<Json<Vec<RoleView>>> {
        Ok(Json(self.role_coordinator.list().await?))
    }

    /// Empty form for a new role
    #[oai(path = "/Role/Create", method = "get", tag = "RoleTags::Roles")]
    async fn create_form(&self) -> Json<RoleForm> {
        Json(RoleForm { name: String::new() })
    }

    #[oai(path = "/Role/Create", method = "post", tag = "RoleTags::Roles")]
    async fn create(&self, req: &Request, body: Json<RoleForm>) -> ApiResult<RoleCreatedResponse> {
        let ctx = RequestContext::from_request(req);
        let role = self.role_coordinator.create(&ctx, body.0).await?;
        let location = format!("/api/Role/{}", role.id);
        Ok(RoleCreatedResponse::Created(Json(role), location))
    }

    #[oai(path = "/Role/Edit/:id", method = "get", tag = "RoleTags::Roles")]
    async fn edit_form(&self, id: Path<i32>) -> ApiResult<Json<RoleView>> {
        Ok(Json(self.role_coordinator.get(id.0).await?))
    }

    #[oai(path = "/Role/Edit/:id", method = "post", tag = "RoleTags::Roles")]
    async fn edit(&self, req: &Request, id: Path<i32>, body: Json<RoleForm>) -> ApiResult<Json<RoleView>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.role_coordinator.edit(&ctx, id.0, body.0).await?))
    }

    /// Delete a role; users holding it are left as they are
    #[oai(path = "/Role/Delete/:id", method = "post", tag = "RoleTags::Roles")]
    async fn delete(&self, req: &Request, id: Path<i32>) -> ApiResult<Json<MessageResponse>> {
        let ctx = RequestContext::from_request(req);
        let role = self.role_coordinator.delete(&ctx, id.0).await?;
        Ok(Json(MessageResponse {
            message: format!("Role '{}' deleted successfully.", role.name),
        }))
    }

    #[oai(path = "/Role/:id", method = "get", tag = "RoleTags::Roles")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<RoleView>> {
        Ok(Json(self.role_coordinator.get(id.0).await?))
    }
}
