use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated) {
            return RepositoryError::NotFound;
        }

        let message = err.to_string();
        let lowered = message.to_lowercase();

        // Postgres unique_violation
        if lowered.contains("23505")
            || lowered.contains("duplicate key")
            || lowered.contains("unique constraint")
        {
            return RepositoryError::Conflict(message);
        }

        RepositoryError::Database(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn duplicate_key_maps_to_conflict() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"idx_users_email_live\"".into(),
        ));

        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::Conflict(_)
        ));
    }

    #[test]
    fn record_not_updated_maps_to_not_found() {
        assert_eq!(
            RepositoryError::from(DbErr::RecordNotUpdated),
            RepositoryError::NotFound
        );
    }

    #[test]
    fn other_errors_map_to_database() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".into()));

        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::Database(msg) if msg.contains("connection refused")
        ));
    }
}
