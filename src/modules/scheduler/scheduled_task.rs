use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    #[error("Task failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ScheduledTask: Send + Sync {
    fn name(&self) -> &str;

    /// Cron expression, e.g. `"0 0 3 * * *"` for 03:00 UTC daily.
    fn schedule(&self) -> &str;

    async fn run(&self) -> Result<(), TaskError>;
}

/// Point in time older than `retention_days` days, or an error when the
/// retention is negative or does not fit the calendar.
pub fn retention_cutoff(retention_days: i64) -> Result<DateTime<Utc>, TaskError> {
    if retention_days < 0 {
        return Err(TaskError::Failed(format!(
            "retention must not be negative, got {retention_days} days"
        )));
    }

    Duration::try_days(retention_days)
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .ok_or_else(|| {
            TaskError::Failed(format!("retention of {retention_days} days is out of range"))
        })
}
