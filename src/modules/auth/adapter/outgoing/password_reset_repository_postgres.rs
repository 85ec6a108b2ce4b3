use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::password_reset_repository::{
    NewPasswordReset, PasswordReset, PasswordResetRepository, PasswordResetRepositoryError,
};
use crate::shared::persistence::RepositoryError;

use super::sea_orm_entity::password_resets::{
    ActiveModel as ResetActiveModel, Column as ResetColumn, Entity as ResetEntity,
    Model as ResetModel,
};

#[derive(Clone, Debug)]
pub struct PasswordResetRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PasswordResetRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: ResetModel) -> PasswordReset {
        PasswordReset {
            id: model.id,
            user_id: model.user_id,
            code_hash: model.code_hash,
            attempts: model.attempts,
            expires_at: model.expires_at.with_timezone(&Utc),
            consumed_at: model.consumed_at.map(|d| d.with_timezone(&Utc)),
            date_created: model.date_created.with_timezone(&Utc),
        }
    }

    fn map_error(err: sea_orm::DbErr) -> PasswordResetRepositoryError {
        match RepositoryError::from(err) {
            RepositoryError::Database(msg)
                if msg.contains("23503") || msg.contains("foreign key") =>
            {
                PasswordResetRepositoryError::UserNotFound
            }
            other => PasswordResetRepositoryError::DatabaseError(other.to_string()),
        }
    }
}

#[async_trait]
impl PasswordResetRepository for PasswordResetRepositoryPostgres {
    async fn create(
        &self,
        reset: NewPasswordReset,
    ) -> Result<PasswordReset, PasswordResetRepositoryError> {
        let active_reset = ResetActiveModel {
            id: Set(reset.id),
            user_id: Set(reset.user_id),
            code_hash: Set(reset.code_hash),
            attempts: Set(0),
            expires_at: Set(reset.expires_at.fixed_offset()),
            consumed_at: Set(None),
            date_created: Set(Utc::now().fixed_offset()),
        };

        let inserted = active_reset
            .insert(self.db.as_ref())
            .await
            .map_err(Self::map_error)?;

        Ok(Self::to_domain(inserted))
    }

    async fn register_attempt(
        &self,
        id: Uuid,
        max_attempts: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<PasswordReset>, PasswordResetRepositoryError> {
        // The guard and the increment are one statement, so parallel
        // confirmations cannot exceed `max_attempts` between them.
        let result = ResetEntity::update_many()
            .col_expr(
                ResetColumn::Attempts,
                Expr::col(ResetColumn::Attempts).add(1),
            )
            .filter(ResetColumn::Id.eq(id))
            .filter(ResetColumn::ConsumedAt.is_null())
            .filter(ResetColumn::ExpiresAt.gt(now.fixed_offset()))
            .filter(ResetColumn::Attempts.lt(max_attempts))
            .exec(self.db.as_ref())
            .await
            .map_err(Self::map_error)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(ResetEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(Self::map_error)?
            .map(Self::to_domain))
    }

    async fn consume(&self, id: Uuid) -> Result<bool, PasswordResetRepositoryError> {
        let result = ResetEntity::update_many()
            .col_expr(
                ResetColumn::ConsumedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(ResetColumn::Id.eq(id))
            .filter(ResetColumn::ConsumedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(Self::map_error)?;

        Ok(result.rows_affected == 1)
    }

    async fn consume_all_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<u64, PasswordResetRepositoryError> {
        let result = ResetEntity::update_many()
            .col_expr(
                ResetColumn::ConsumedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(ResetColumn::UserId.eq(user_id))
            .filter(ResetColumn::ConsumedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(Self::map_error)?;

        Ok(result.rows_affected)
    }

    async fn purge_expired_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, PasswordResetRepositoryError> {
        let result = ResetEntity::delete_many()
            .filter(ResetColumn::ExpiresAt.lt(cutoff.fixed_offset()))
            .exec(self.db.as_ref())
            .await
            .map_err(Self::map_error)?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn reset_model(id: Uuid, attempts: i32) -> ResetModel {
        let now = Utc::now().fixed_offset();
        ResetModel {
            id,
            user_id: Uuid::new_v4(),
            code_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            attempts,
            expires_at: now + Duration::minutes(15),
            consumed_at: None,
            date_created: now,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_reset() {
        let id = Uuid::new_v4();
        let model = reset_model(id, 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));

        let created = repo
            .create(NewPasswordReset {
                id,
                user_id: model.user_id,
                code_hash: model.code_hash.clone(),
                expires_at: model.expires_at.with_timezone(&Utc),
            })
            .await
            .unwrap();

        assert_eq!(created.id, id);
        assert_eq!(created.attempts, 0);
        assert_eq!(created.consumed_at, None);
    }

    #[tokio::test]
    async fn test_create_for_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "insert or update on table \"password_resets\" violates foreign key constraint"
                    .to_string(),
            ))])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .create(NewPasswordReset {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                code_hash: "hash".to_string(),
                expires_at: Utc::now(),
            })
            .await;

        assert_eq!(result, Err(PasswordResetRepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_register_attempt_guards_and_increments_in_one_update() {
        let id = Uuid::new_v4();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results(vec![exec(1)])
                .append_query_results(vec![vec![reset_model(id, 3)]])
                .into_connection(),
        );
        let repo = PasswordResetRepositoryPostgres::new(Arc::clone(&db));

        let reset = repo.register_attempt(id, 5, Utc::now()).await.unwrap();
        drop(repo);

        assert_eq!(reset.map(|r| r.attempts), Some(3));
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let update = format!("{:?}", log[0]);
        assert!(update.contains("UPDATE"));
        assert!(update.contains("attempts"));
        assert!(update.contains(" + "));
        assert!(update.contains("IS NULL"));
        assert!(update.contains("expires_at"));
    }

    #[tokio::test]
    async fn test_register_attempt_on_closed_reset() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results(vec![exec(0)])
                .into_connection(),
        );
        let repo = PasswordResetRepositoryPostgres::new(Arc::clone(&db));

        let reset = repo
            .register_attempt(Uuid::new_v4(), 5, Utc::now())
            .await
            .unwrap();
        drop(repo);

        assert_eq!(reset, None);
        // No follow-up read once the guard refused
        assert_eq!(Arc::try_unwrap(db).unwrap().into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(1), exec(0)])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));
        let id = Uuid::new_v4();

        assert_eq!(repo.consume(id).await, Ok(true));
        assert_eq!(repo.consume(id).await, Ok(false));
    }

    #[tokio::test]
    async fn test_consume_all_for_user_reports_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2)])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.consume_all_for_user(Uuid::new_v4()).await, Ok(2));
    }

    #[tokio::test]
    async fn test_purge_expired_before() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(9)])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.purge_expired_before(Utc::now()).await, Ok(9));
    }

    #[tokio::test]
    async fn test_database_error_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![DbErr::Conn(RuntimeErr::Internal("down".into()))])
            .into_connection();
        let repo = PasswordResetRepositoryPostgres::new(Arc::new(db));

        let result = repo.consume(Uuid::new_v4()).await;

        assert!(matches!(result, Err(PasswordResetRepositoryError::DatabaseError(_))));
    }
}
