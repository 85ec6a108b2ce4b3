use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, IntoActiveModel, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::shared::audit::AuditInfo;
use crate::shared::persistence::{GenericRepository, Page, PageRequest, RepositoryError};
use crate::user::application::domain::entities::{decode_roles, encode_roles, User};
use crate::user::application::ports::outgoing::user_repository::{
    NewUser, UserChanges, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
    Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    repo: GenericRepository<UserEntity>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repo: GenericRepository::new(db),
        }
    }

    fn to_domain(model: UserModel) -> Result<User, UserRepositoryError> {
        let roles = decode_roles(&model.roles)
            .map_err(|e| UserRepositoryError::InvalidStoredData(e.to_string()))?;

        Ok(User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            email: model.email,
            password_hash: model.password_hash,
            roles,
            is_active: model.is_active,
            audit: AuditInfo {
                date_created: model.date_created.with_timezone(&Utc),
                creator_id: model.creator_id,
                is_delete: model.is_delete,
                date_delete: model.date_delete.map(|d| d.with_timezone(&Utc)),
                date_updated: model.date_updated.map(|d| d.with_timezone(&Utc)),
            },
        })
    }

    fn map_error(err: RepositoryError) -> UserRepositoryError {
        match err {
            RepositoryError::NotFound => UserRepositoryError::UserNotFound,
            // The only unique index on users is the live-email one
            RepositoryError::Conflict(_) => UserRepositoryError::EmailAlreadyExists,
            RepositoryError::Database(msg) => UserRepositoryError::DatabaseError(msg),
        }
    }

    async fn find_live_model(&self, id: Uuid) -> Result<UserModel, UserRepositoryError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let roles = encode_roles(&user.roles)
            .map_err(|e| UserRepositoryError::InvalidStoredData(e.to_string()))?;

        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone_number: Set(user.phone_number),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(user.password_hash),
            roles: Set(roles),
            is_active: Set(user.is_active),
            date_created: Set(Utc::now().fixed_offset()),
            creator_id: Set(user.creator_id),
            is_delete: Set(false),
            date_delete: Set(None),
            date_updated: Set(None),
        };

        let inserted = self
            .repo
            .insert(active_user)
            .await
            .map_err(Self::map_error)?;

        Self::to_domain(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .map(Self::to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        self.repo
            .find_one_where(Condition::all().add(UserColumn::Email.eq(email.to_lowercase())))
            .await
            .map_err(Self::map_error)?
            .map(Self::to_domain)
            .transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserRepositoryError> {
        self.repo
            .list(page)
            .await
            .map_err(Self::map_error)?
            .try_map(Self::to_domain)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, UserRepositoryError> {
        let model = self.find_live_model(id).await?;
        let mut active_user: UserActiveModel = model.into_active_model();

        if let Some(first_name) = changes.first_name {
            active_user.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active_user.last_name = Set(last_name);
        }
        if let Some(phone_number) = changes.phone_number {
            active_user.phone_number = Set(phone_number);
        }
        if let Some(roles) = changes.roles {
            let encoded = encode_roles(&roles)
                .map_err(|e| UserRepositoryError::InvalidStoredData(e.to_string()))?;
            active_user.roles = Set(encoded);
        }
        if let Some(is_active) = changes.is_active {
            active_user.is_active = Set(is_active);
        }

        let updated = self
            .repo
            .update(active_user)
            .await
            .map_err(Self::map_error)?;

        Self::to_domain(updated)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let model = self.find_live_model(id).await?;
        let mut active_user: UserActiveModel = model.into_active_model();
        active_user.password_hash = Set(password_hash);

        self.repo
            .update(active_user)
            .await
            .map_err(Self::map_error)?;

        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        self.repo.soft_delete(id).await.map_err(Self::map_error)
    }

    async fn restore(&self, id: Uuid) -> Result<User, UserRepositoryError> {
        self.repo.restore(id).await.map_err(Self::map_error)?;

        let model = self.find_live_model(id).await?;
        Self::to_domain(model)
    }

    async fn hard_delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        self.repo.hard_delete(id).await.map_err(Self::map_error)
    }

    async fn purge_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, UserRepositoryError> {
        self.repo
            .purge_deleted_before(cutoff)
            .await
            .map_err(Self::map_error)
    }
}
