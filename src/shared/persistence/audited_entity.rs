use sea_orm::EntityTrait;

/// Entities that carry the shared audit and soft-delete columns.
pub trait AuditedEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn date_created_column() -> Self::Column;
    fn date_updated_column() -> Self::Column;
    fn is_delete_column() -> Self::Column;
    fn date_delete_column() -> Self::Column;
}
