use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Audit and soft-delete fields carried by every persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditInfo {
    pub date_created: DateTime<Utc>,
    pub creator_id: Option<Uuid>,
    pub is_delete: bool,
    pub date_delete: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl AuditInfo {
    pub fn new(creator_id: Option<Uuid>) -> Self {
        Self {
            date_created: Utc::now(),
            creator_id,
            is_delete: false,
            date_delete: None,
            date_updated: None,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.is_delete
    }
}
