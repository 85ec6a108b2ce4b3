use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::Session;
use crate::auth::application::ports::outgoing::session_repository::{
    NewSession, SessionRepository, SessionRepositoryError,
};
use crate::shared::audit::AuditInfo;
use crate::shared::persistence::{GenericRepository, RepositoryError};
use crate::user::application::domain::entities::{decode_roles, encode_roles};

use super::sea_orm_entity::tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
    Model as TokenModel,
};

#[derive(Clone, Debug)]
pub struct SessionRepositoryPostgres {
    repo: GenericRepository<TokenEntity>,
}

impl SessionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repo: GenericRepository::new(db),
        }
    }

    fn to_domain(model: TokenModel) -> Result<Session, SessionRepositoryError> {
        let roles = decode_roles(&model.roles)
            .map_err(|e| SessionRepositoryError::InvalidStoredData(e.to_string()))?;

        Ok(Session {
            id: model.id,
            user_id: model.user_id,
            app_version: model.app_version,
            user_agent: model.user_agent,
            token_hash: model.auth_token,
            push_token: model.push_token,
            roles,
            audit: AuditInfo {
                date_created: model.date_created.with_timezone(&Utc),
                creator_id: model.creator_id,
                is_delete: model.is_delete,
                date_delete: model.date_delete.map(|d| d.with_timezone(&Utc)),
                date_updated: model.date_updated.map(|d| d.with_timezone(&Utc)),
            },
        })
    }

    fn map_error(err: RepositoryError) -> SessionRepositoryError {
        match err {
            RepositoryError::NotFound => SessionRepositoryError::SessionNotFound,
            RepositoryError::Conflict(msg) => SessionRepositoryError::DatabaseError(msg),
            RepositoryError::Database(msg)
                if msg.contains("23503") || msg.contains("foreign key") =>
            {
                SessionRepositoryError::UserNotFound
            }
            RepositoryError::Database(msg) => SessionRepositoryError::DatabaseError(msg),
        }
    }

    async fn live_model(&self, id: Uuid) -> Result<TokenModel, SessionRepositoryError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or(SessionRepositoryError::SessionNotFound)
    }
}

#[async_trait]
impl SessionRepository for SessionRepositoryPostgres {
    async fn create(&self, session: NewSession) -> Result<Session, SessionRepositoryError> {
        let roles = encode_roles(&session.roles)
            .map_err(|e| SessionRepositoryError::InvalidStoredData(e.to_string()))?;

        let active_token = TokenActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            app_version: Set(session.app_version),
            user_agent: Set(session.user_agent),
            auth_token: Set(session.token_hash),
            push_token: Set(session.push_token),
            roles: Set(roles),
            date_created: Set(Utc::now().fixed_offset()),
            // Sessions are opened by their owner
            creator_id: Set(Some(session.user_id)),
            is_delete: Set(false),
            date_delete: Set(None),
            date_updated: Set(None),
        };

        let inserted = self
            .repo
            .insert(active_token)
            .await
            .map_err(Self::map_error)?;

        Self::to_domain(inserted)
    }

    async fn find_live(&self, id: Uuid) -> Result<Option<Session>, SessionRepositoryError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .map(Self::to_domain)
            .transpose()
    }

    async fn list_live_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        self.repo
            .find_where(Condition::all().add(TokenColumn::UserId.eq(user_id)))
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }

    async fn rotate_token(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: String,
    ) -> Result<(), SessionRepositoryError> {
        let result = TokenEntity::update_many()
            .col_expr(TokenColumn::AuthToken, Expr::value(new_hash))
            .col_expr(TokenColumn::DateUpdated, Expr::value(Utc::now().fixed_offset()))
            .filter(TokenColumn::Id.eq(id))
            .filter(TokenColumn::IsDelete.eq(false))
            .filter(TokenColumn::AuthToken.eq(expected_hash))
            .exec(self.repo.db())
            .await
            .map_err(|e| Self::map_error(RepositoryError::from(e)))?;

        if result.rows_affected == 0 {
            return Err(SessionRepositoryError::TokenMismatch);
        }
        Ok(())
    }

    async fn update_push_token(
        &self,
        id: Uuid,
        push_token: Option<String>,
    ) -> Result<(), SessionRepositoryError> {
        let mut active_token = self.live_model(id).await?.into_active_model();
        active_token.push_token = Set(push_token);

        self.repo
            .update(active_token)
            .await
            .map_err(Self::map_error)?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), SessionRepositoryError> {
        self.repo.soft_delete(id).await.map_err(Self::map_error)
    }

    async fn soft_delete_for_user(&self, user_id: Uuid) -> Result<u64, SessionRepositoryError> {
        self.repo
            .soft_delete_where(Condition::all().add(TokenColumn::UserId.eq(user_id)))
            .await
            .map_err(Self::map_error)
    }

    async fn purge_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, SessionRepositoryError> {
        self.repo
            .purge_deleted_before(cutoff)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::application::domain::entities::Role;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn token_model(id: Uuid, user_id: Uuid) -> TokenModel {
        TokenModel {
            id,
            user_id,
            app_version: Some("1.4.0".to_string()),
            user_agent: Some("okhttp/4.12".to_string()),
            auth_token: "a".repeat(64),
            push_token: None,
            roles: r#"["user"]"#.to_string(),
            date_created: Utc::now().fixed_offset(),
            creator_id: Some(user_id),
            is_delete: false,
            date_delete: None,
            date_updated: None,
        }
    }

    fn new_session(user_id: Uuid) -> NewSession {
        NewSession {
            id: Uuid::new_v4(),
            user_id,
            app_version: Some("1.4.0".to_string()),
            user_agent: Some("okhttp/4.12".to_string()),
            token_hash: "a".repeat(64),
            push_token: None,
            roles: vec![Role::User],
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_session() {
        let user_id = Uuid::new_v4();
        let session = new_session(user_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![token_model(session.id, user_id)]])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        let created = repo.create(session.clone()).await.unwrap();

        assert_eq!(created.id, session.id);
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.roles, vec![Role::User]);
    }

    #[tokio::test]
    async fn test_create_session_for_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "insert or update on table \"tokens\" violates foreign key constraint \"fk_tokens_user_id\""
                    .to_string(),
            ))])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        let result = repo.create(new_session(Uuid::new_v4())).await;

        assert_eq!(result, Err(SessionRepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_find_live_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<TokenModel>::new()])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.find_live(Uuid::new_v4()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_list_live_for_user() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                token_model(Uuid::new_v4(), user_id),
                token_model(Uuid::new_v4(), user_id),
            ]])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        let sessions = repo.list_live_for_user(user_id).await.unwrap();

        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.user_id == user_id));
    }

    #[tokio::test]
    async fn test_rotate_token_swaps_only_the_expected_hash() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results(vec![exec(1)])
                .into_connection(),
        );
        let repo = SessionRepositoryPostgres::new(Arc::clone(&db));

        repo.rotate_token(Uuid::new_v4(), &"a".repeat(64), "b".repeat(64))
            .await
            .unwrap();
        drop(repo);

        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = format!("{:?}", log);
        assert_eq!(log.len(), 1);
        assert!(sql.contains("UPDATE"));
        assert!(sql.contains("auth_token"));
        assert!(sql.contains(&"a".repeat(64)));
        assert!(sql.contains(&"b".repeat(64)));
    }

    #[tokio::test]
    async fn test_rotate_token_when_hash_already_moved_on() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .rotate_token(Uuid::new_v4(), &"a".repeat(64), "b".repeat(64))
            .await;

        assert_eq!(result, Err(SessionRepositoryError::TokenMismatch));
    }

    #[tokio::test]
    async fn test_update_push_token() {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let mut updated = token_model(id, user_id);
        updated.push_token = Some("fcm-token".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![token_model(id, user_id)]])
            .append_query_results(vec![vec![updated]])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .update_push_token(id, Some("fcm-token".to_string()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_soft_delete_missing_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        assert_eq!(
            repo.soft_delete(Uuid::new_v4()).await,
            Err(SessionRepositoryError::SessionNotFound)
        );
    }

    #[tokio::test]
    async fn test_soft_delete_for_user_reports_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(4)])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.soft_delete_for_user(Uuid::new_v4()).await, Ok(4));
    }

    #[tokio::test]
    async fn test_purge_deleted_before() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2)])
            .into_connection();
        let repo = SessionRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.purge_deleted_before(Utc::now()).await, Ok(2));
    }
}
