pub mod entities;
pub mod password_policy;
pub mod user_fields;
