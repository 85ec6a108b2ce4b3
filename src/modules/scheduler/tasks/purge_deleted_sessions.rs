use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::SessionRepository;
use crate::scheduler::{retention_cutoff, ScheduledTask, TaskError};

/// Physically removes sessions soft-deleted longer than the retention period.
pub struct PurgeDeletedSessionsTask {
    sessions: Arc<dyn SessionRepository + Send + Sync>,
    cron: String,
    retention_days: i64,
}

impl PurgeDeletedSessionsTask {
    pub fn new(
        sessions: Arc<dyn SessionRepository + Send + Sync>,
        cron: String,
        retention_days: i64,
    ) -> Self {
        Self {
            sessions,
            cron,
            retention_days,
        }
    }
}

#[async_trait]
impl ScheduledTask for PurgeDeletedSessionsTask {
    fn name(&self) -> &str {
        "purge_deleted_sessions"
    }

    fn schedule(&self) -> &str {
        &self.cron
    }

    async fn run(&self) -> Result<(), TaskError> {
        let cutoff = retention_cutoff(self.retention_days)?;
        let purged = self
            .sessions
            .purge_deleted_before(cutoff)
            .await
            .map_err(|e| TaskError::Failed(e.to_string()))?;

        tracing::info!(purged, cutoff = %cutoff, "Purged deleted sessions");
        Ok(())
    }
}
