pub mod audited_entity;
pub mod error;
pub mod generic_repository;
pub mod page;

pub use audited_entity::AuditedEntity;
pub use error::RepositoryError;
pub use generic_repository::GenericRepository;
pub use page::{Page, PageRequest};
