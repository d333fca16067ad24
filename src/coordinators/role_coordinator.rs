use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::user_rules::validate_role;
use crate::stores::{next_id_of, EntityStore};
use crate::types::domain::{Role, User};
use crate::types::dto::user::{RoleForm, RoleView};
use crate::types::internal::{EntityKind, RequestContext};

/// Role CRUD; deleting a role leaves its users pointing at the old id
pub struct RoleCoordinator {
    roles: Arc<EntityStore<Role>>,
    users: Arc<EntityStore<User>>,
}

impl RoleCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            roles: app_data.roles.clone(),
            users: app_data.users.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<RoleView>, InternalError> {
        let users = self.users.all().await?;
        let mut roles = self.roles.all().await?;
        roles.sort_by_key(|r| r.id);
        Ok(roles.into_iter().map(|r| RoleView::new(r, &users)).collect())
    }

    pub async fn get(&self, id: i32) -> Result<RoleView, InternalError> {
        let role = self.roles.get(id).await?;
        let users = self.users.all().await?;
        Ok(RoleView::new(role, &users))
    }

    pub async fn create(&self, ctx: &RequestContext, form: RoleForm) -> Result<RoleView, InternalError> {
        let role = self
            .roles
            .update(|records| {
                let candidate = Role {
                    id: next_id_of(records),
                    name: form.name.trim().to_string(),
                };
                validate_role(&candidate, records)?;
                records.push(candidate.clone());
                Ok(candidate)
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, role_id = role.id, "Role created");
        Ok(RoleView::new(role, &[]))
    }

    pub async fn edit(&self, ctx: &RequestContext, id: i32, form: RoleForm) -> Result<RoleView, InternalError> {
        let role = self
            .roles
            .update(|records| {
                let index = records
                    .iter()
                    .position(|r| r.id == id)
                    .ok_or_else(|| InternalError::not_found(EntityKind::Role, id))?;
                let candidate = Role {
                    id,
                    name: form.name.trim().to_string(),
                };
                validate_role(&candidate, records)?;
                records[index] = candidate.clone();
                Ok(candidate)
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, role_id = id, "Role updated");
        let users = self.users.all().await?;
        Ok(RoleView::new(role, &users))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: i32) -> Result<Role, InternalError> {
        let removed = self.roles.remove(id).await?;
        tracing::info!(request_id = %ctx.request_id, role_id = id, "Role deleted");
        Ok(removed)
    }
}
