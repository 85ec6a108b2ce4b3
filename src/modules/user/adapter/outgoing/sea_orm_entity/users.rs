use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::shared::persistence::AuditedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub password_hash: String,
    /// JSON array text, see `encode_roles`
    #[sea_orm(column_type = "Text")]
    pub roles: String,
    pub is_active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub creator_id: Option<Uuid>,
    pub is_delete: bool,
    pub date_delete: Option<DateTimeWithTimeZone>,
    pub date_updated: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::auth::adapter::outgoing::sea_orm_entity::tokens::Entity")]
    Tokens,
}

impl Related<crate::auth::adapter::outgoing::sea_orm_entity::tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tokens.def()
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

        // Only stamp date_updated on UPDATE, not INSERT
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
