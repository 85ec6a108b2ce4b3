pub mod user_repository;

pub use user_repository::{NewUser, UserChanges, UserRepository, UserRepositoryError};
