pub mod auth;
pub mod email;
pub mod scheduler;
pub mod storage;
pub mod user;
