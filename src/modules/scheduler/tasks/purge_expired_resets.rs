use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::ports::outgoing::PasswordResetRepository;
use crate::scheduler::{ScheduledTask, TaskError};

/// Drops password reset requests whose code has expired.
pub struct PurgeExpiredResetsTask {
    resets: Arc<dyn PasswordResetRepository + Send + Sync>,
    cron: String,
}

impl PurgeExpiredResetsTask {
    pub fn new(resets: Arc<dyn PasswordResetRepository + Send + Sync>, cron: String) -> Self {
        Self { resets, cron }
    }
}

#[async_trait]
impl ScheduledTask for PurgeExpiredResetsTask {
    fn name(&self) -> &str {
        "purge_expired_resets"
    }

    fn schedule(&self) -> &str {
        &self.cron
    }

    async fn run(&self) -> Result<(), TaskError> {
        let purged = self
            .resets
            .purge_expired_before(Utc::now())
            .await
            .map_err(|e| TaskError::Failed(e.to_string()))?;

        tracing::info!(purged, "Purged expired password resets");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::{
        NewPasswordReset, PasswordResetRepositoryError,
    };
    use crate::tests::support::fakes::InMemoryPasswordResetRepository;
    use chrono::Duration;
    use uuid::Uuid;

    async fn reset_expiring_in(resets: &InMemoryPasswordResetRepository, secs: i64) -> Uuid {
        let id = Uuid::new_v4();
        resets
            .create(NewPasswordReset {
                id,
                user_id: Uuid::new_v4(),
                code_hash: "hashed".to_string(),
                expires_at: Utc::now() + Duration::seconds(secs),
            })
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_purges_only_expired_resets() {
        let resets = Arc::new(InMemoryPasswordResetRepository::new());
        let expired = reset_expiring_in(&resets, -60).await;
        let open = reset_expiring_in(&resets, 600).await;

        PurgeExpiredResetsTask::new(resets.clone(), "0 0 3 * * *".into())
            .run()
            .await
            .unwrap();

        assert!(resets.get(expired).is_none());
        assert!(resets.get(open).is_some());
    }

    #[tokio::test]
    async fn test_repository_failure_is_reported() {
        let resets = Arc::new(InMemoryPasswordResetRepository::new());
        resets.fail_with(PasswordResetRepositoryError::DatabaseError("db down".to_string()));

        let task = PurgeExpiredResetsTask::new(resets, "0 0 3 * * *".into());

        assert!(matches!(task.run().await, Err(TaskError::Failed(msg)) if msg.contains("db down")));
    }
}
