use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::ApiResult;
use crate::coordinators::UserCoordinator;
use crate::types::dto::user::{UserCreatedResponse, UserForm, UserFormOptions, UserView};
use crate::types::internal::RequestContext;
use crate::AppData;

pub struct UserApi {
    user_coordinator: UserCoordinator,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_coordinator: UserCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User administration
    Users,
}

#[OpenApi]
impl UserApi {
    #[oai(path = "/User", method = "get", tag = "UserTags::Users")]
    async fn index(&self) -> ApiResult<Json<Vec<UserView>>> {
        Ok(Json(self.user_coordinator.list().await?))
    }

    /// Role choices for a new user
    #[oai(path = "/User/Create", method = "get", tag = "UserTags::Users")]
    async fn create_form(&self) -> ApiResult<Json<UserFormOptions>> {
        Ok(Json(self.user_coordinator.create_form().await?))
    }

    #[oai(path = "/User/Create", method = "post", tag = "UserTags::Users")]
    async fn create(&self, req: &Request, body: Json<UserForm>) -> ApiResult<UserCreatedResponse> {
        let ctx = RequestContext::from_request(req);
        let user = self.user_coordinator.create(&ctx, body.0).await?;
        let location = format!("/api/User/{}", user.id);
        Ok(UserCreatedResponse::Created(Json(user), location))
    }

    #[oai(path = "/User/Edit/:id", method = "get", tag = "UserTags::Users")]
    async fn edit_form(&self, id: Path<i32>) -> ApiResult<Json<UserView>> {
        Ok(Json(self.user_coordinator.get(id.0).await?))
    }

    #[oai(path = "/User/Edit/:id", method = "post", tag = "UserTags::Users")]
    async fn edit(&self, req: &Request, id: Path<i32>, body: Json<UserForm>) -> ApiResult<Json<UserView>> {
        let ctx = RequestContext::from_request(req);
        Ok(Json(self.user_coordinator.edit(&ctx, id.0, body.0).await?))
    }

    #[oai(path = "/User/:id", method = "get", tag = "UserTags::Users")]
    async fn details(&self, id: Path<i32>) -> ApiResult<Json<UserView>> {
        Ok(Json(self.user_coordinator.get(id.0).await?))
    }
}
