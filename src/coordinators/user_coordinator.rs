use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::user_rules::validate_user;
use crate::stores::{next_id_of, EntityStore};
use crate::types::domain::{Role, User};
use crate::types::dto::user::{RoleView, UserForm, UserFormOptions, UserView};
use crate::types::internal::{EntityKind, RequestContext};

/// User management; users are never deleted
pub struct UserCoordinator {
    users: Arc<EntityStore<User>>,
    roles: Arc<EntityStore<Role>>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            users: app_data.users.clone(),
            roles: app_data.roles.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserView>, InternalError> {
        let roles = self.roles.all().await?;
        let mut users = self.users.all().await?;
        users.sort_by_key(|u| u.id);
        Ok(users.into_iter().map(|u| UserView::new(u, &roles)).collect())
    }

    pub async fn get(&self, id: i32) -> Result<UserView, InternalError> {
        let user = self.users.get(id).await?;
        let roles = self.roles.all().await?;
        Ok(UserView::new(user, &roles))
    }

    pub async fn create_form(&self) -> Result<UserFormOptions, InternalError> {
        let users = self.users.all().await?;
        let roles = self.roles.all().await?;
        Ok(UserFormOptions {
            roles: roles.into_iter().map(|r| RoleView::new(r, &users)).collect(),
        })
    }

    pub async fn create(&self, ctx: &RequestContext, form: UserForm) -> Result<UserView, InternalError> {
        let roles = self.roles.all().await?;

        let user = self
            .users
            .update(|records| {
                let candidate = user_from_form(next_id_of(records), form);
                validate_user(&candidate, records, &roles)?;
                records.push(candidate.clone());
                Ok(candidate)
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, user_id = user.id, "User created");
        Ok(UserView::new(user, &roles))
    }

    pub async fn edit(&self, ctx: &RequestContext, id: i32, form: UserForm) -> Result<UserView, InternalError> {
        let roles = self.roles.all().await?;

        let user = self
            .users
            .update(|records| {
                let index = records
                    .iter()
                    .position(|u| u.id == id)
                    .ok_or_else(|| InternalError::not_found(EntityKind::User, id))?;
                let candidate = user_from_form(id, form);
                validate_user(&candidate, records, &roles)?;
                records[index] = candidate.clone();
                Ok(candidate)
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, user_id = id, "User updated");
        Ok(UserView::new(user, &roles))
    }
}

fn user_from_form(id: i32, form: UserForm) -> User {
    User {
        id,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        contact_number: form.contact_number.trim().to_string(),
        hourly_rate: form.hourly_rate,
        role_id: form.role_id,
    }
}
