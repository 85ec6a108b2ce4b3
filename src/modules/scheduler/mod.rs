//! Background jobs driven by cron expressions (six fields, seconds first).

pub mod schedule_host;
pub mod scheduled_task;
pub mod tasks;

pub use schedule_host::{RunningSchedule, ScheduleError, ScheduleHost};
pub use scheduled_task::{retention_cutoff, ScheduledTask, TaskError};
