use std::sync::Arc;

use async_trait::async_trait;

use crate::scheduler::{retention_cutoff, ScheduledTask, TaskError};
use crate::user::application::ports::outgoing::UserRepository;

/// Physically removes users soft-deleted longer than the retention period.
/// Their sessions go with them through the foreign key cascade.
pub struct PurgeDeletedUsersTask {
    users: Arc<dyn UserRepository + Send + Sync>,
    cron: String,
    retention_days: i64,
}

impl PurgeDeletedUsersTask {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>, cron: String, retention_days: i64) -> Self {
        Self {
            users,
            cron,
            retention_days,
        }
    }
}

#[async_trait]
impl ScheduledTask for PurgeDeletedUsersTask {
    fn name(&self) -> &str {
        "purge_deleted_users"
    }

    fn schedule(&self) -> &str {
        &self.cron
    }

    async fn run(&self) -> Result<(), TaskError> {
        let cutoff = retention_cutoff(self.retention_days)?;
        let purged = self
            .users
            .purge_deleted_before(cutoff)
            .await
            .map_err(|e| TaskError::Failed(e.to_string()))?;

        if purged > 0 {
            tracing::warn!(purged, cutoff = %cutoff, "Purged deleted users");
        } else {
            tracing::debug!(cutoff = %cutoff, "No deleted users to purge");
        }
        Ok(())
    }
}
