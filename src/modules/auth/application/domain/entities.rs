use uuid::Uuid;

use crate::shared::audit::AuditInfo;
use crate::user::application::domain::entities::Role;

/// A signed-in device. Persisted as a row of the `tokens` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    /// SHA-256 hex of the refresh token currently valid for this session
    pub token_hash: String,
    pub push_token: Option<String>,
    pub roles: Vec<Role>,
    pub audit: AuditInfo,
}

/// Client-reported device details captured at login.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    pub push_token: Option<String>,
}
