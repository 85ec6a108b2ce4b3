pub mod jwt;
pub mod password_reset_repository_postgres;
pub mod sea_orm_entity;
pub mod security;
pub mod session_repository_postgres;

pub use password_reset_repository_postgres::PasswordResetRepositoryPostgres;
pub use session_repository_postgres::SessionRepositoryPostgres;
