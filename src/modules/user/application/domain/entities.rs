use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::audit::AuditInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
    User,
}

/// Roles are persisted as a JSON array string, e.g. `["admin","user"]`.
pub fn encode_roles(roles: &[Role]) -> Result<String, serde_json::Error> {
    serde_json::to_string(roles)
}

pub fn decode_roles(raw: &str) -> Result<Vec<Role>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub audit: AuditInfo,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
