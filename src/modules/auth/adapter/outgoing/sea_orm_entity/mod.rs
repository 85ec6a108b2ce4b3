pub mod password_resets;
pub mod tokens;
