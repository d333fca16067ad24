use poem_openapi::{payload::Json, ApiResponse, Object};
use rust_decimal::Decimal;

use crate::types::domain::{Role, User};

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub hourly_rate: Decimal,
    pub role_id: i32,
    pub role_name: Option<String>,
}

impl UserView {
    pub fn new(user: User, roles: &[Role]) -> Self {
        let role_name = roles
            .iter()
            .find(|r| r.id == user.role_id)
            .map(|r| r.name.clone());
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            contact_number: user.contact_number,
            hourly_rate: user.hourly_rate,
            role_id: user.role_id,
            role_name,
        }
    }
}

/// Create / edit payload for a user
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[oai(default)]
    pub contact_number: String,
    #[oai(default)]
    pub hourly_rate: Decimal,
    pub role_id: i32,
}

/// Choices for the user create form
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserFormOptions {
    pub roles: Vec<RoleView>,
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct RoleView {
    pub id: i32,
    pub name: String,
    /// Number of users currently holding the role
    pub user_count: u32,
}

impl RoleView {
    pub fn new(role: Role, users: &[User]) -> Self {
        let user_count = users.iter().filter(|u| u.role_id == role.id).count() as u32;
        Self {
            id: role.id,
            name: role.name,
            user_count,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct RoleForm {
    pub name: String,
}

#[derive(ApiResponse)]
pub enum UserCreatedResponse {
    #[oai(status = 201)]
    Created(Json<UserView>, #[oai(header = "Location")] String),
}

#[derive(ApiResponse)]
pub enum RoleCreatedResponse {
    #[oai(status = 201)]
    Created(Json<RoleView>, #[oai(header = "Location")] String),
}
