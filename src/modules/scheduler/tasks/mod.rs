mod purge_deleted_sessions;
mod purge_deleted_users;
mod purge_expired_resets;

pub use purge_deleted_sessions::PurgeDeletedSessionsTask;
pub use purge_deleted_users::PurgeDeletedUsersTask;
pub use purge_expired_resets::PurgeExpiredResetsTask;
