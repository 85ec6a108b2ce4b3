use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::user::application::domain::entities::{Role, User};

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub date_created: DateTime<Utc>,
    pub creator_id: Option<Uuid>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            roles: user.roles,
            is_active: user.is_active,
            date_created: user.audit.date_created,
            creator_id: user.audit.creator_id,
            date_updated: user.audit.date_updated,
        }
    }
}
