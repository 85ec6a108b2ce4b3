use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use cron::Schedule;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::scheduled_task::ScheduledTask;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}' for task {task}: {reason}")]
    InvalidCron {
        task: String,
        expression: String,
        reason: String,
    },
}

struct Registration {
    task: Arc<dyn ScheduledTask>,
    schedule: Schedule,
}

/// Collects tasks and runs each one on its own tokio task.
#[derive(Default)]
pub struct ScheduleHost {
    registrations: Vec<Registration>,
}

impl ScheduleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the task's cron expression up front so bad settings fail at startup.
    pub fn register(&mut self, task: Arc<dyn ScheduledTask>) -> Result<(), ScheduleError> {
        let schedule =
            Schedule::from_str(task.schedule()).map_err(|e| ScheduleError::InvalidCron {
                task: task.name().to_string(),
                expression: task.schedule().to_string(),
                reason: e.to_string(),
            })?;

        info!(task = task.name(), cron = task.schedule(), "Scheduled task registered");
        self.registrations.push(Registration { task, schedule });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn start(self) -> RunningSchedule {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handles = self
            .registrations
            .into_iter()
            .map(|r| tokio::spawn(run_loop(r.task, r.schedule, shutdown_rx.clone())))
            .collect();

        RunningSchedule {
            shutdown: shutdown_tx,
            handles,
        }
    }
}

async fn run_loop(
    task: Arc<dyn ScheduledTask>,
    schedule: Schedule,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let Some(next) = schedule.upcoming(Utc).next() else {
            warn!(task = task.name(), "Schedule has no upcoming run; stopping");
            return;
        };
        let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            // Also fires when the sender is dropped
            _ = shutdown.changed() => {
                info!(task = task.name(), "Scheduled task stopped");
                return;
            }
        }

        let started = Instant::now();
        match task.run().await {
            Ok(()) => info!(
                task = task.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Scheduled task completed"
            ),
            Err(e) => error!(
                task = task.name(),
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Scheduled task failed"
            ),
        }
    }
}

/// Handle to the spawned loops.
pub struct RunningSchedule {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl RunningSchedule {
    /// Signals every loop and waits for them; a task already running finishes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Scheduled task panicked");
            }
        }
    }
}
