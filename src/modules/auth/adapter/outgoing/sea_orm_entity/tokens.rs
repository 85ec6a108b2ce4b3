use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::shared::persistence::AuditedEntity;

/// One row per signed-in device.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    /// SHA-256 hex of the current refresh token
    pub auth_token: String,
    pub push_token: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub roles: String,
    pub date_created: DateTimeWithTimeZone,
    pub creator_id: Option<Uuid>,
    pub is_delete: bool,
    pub date_delete: Option<DateTimeWithTimeZone>,
    pub date_updated: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::user::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<crate::user::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            self.date_updated = Set(Some(Utc::now().into()));
        }

        Ok(self)
    }
}

impl AuditedEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn date_created_column() -> Column {
        Column::DateCreated
    }

    fn date_updated_column() -> Column {
        Column::DateUpdated
    }

    fn is_delete_column() -> Column {
        Column::IsDelete
    }

    fn date_delete_column() -> Column {
        Column::DateDelete
    }
}
