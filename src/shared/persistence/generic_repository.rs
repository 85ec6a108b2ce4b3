use std::{fmt, marker::PhantomData, sync::Arc};

use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone, sea_query::Expr, ActiveModelBehavior, ActiveModelTrait,
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use super::{AuditedEntity, Page, PageRequest, RepositoryError};

/// CRUD plus soft delete for any [`AuditedEntity`].
///
/// Reads only see live rows (`is_delete = false`) unless the method name says
/// otherwise. Entity-specific adapters wrap this and add their own queries.
pub struct GenericRepository<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for GenericRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            _entity: PhantomData,
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl<E> fmt::Debug for GenericRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRepository")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E> GenericRepository<E>
where
    E: AuditedEntity,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Base query over rows that are not soft-deleted.
    pub fn live() -> Select<E> {
        E::find().filter(E::is_delete_column().eq(false))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, RepositoryError> {
        Ok(Self::live()
            .filter(E::id_column().eq(id))
            .one(self.db())
            .await?)
    }

    pub async fn find_by_id_with_deleted(
        &self,
        id: Uuid,
    ) -> Result<Option<E::Model>, RepositoryError> {
        Ok(E::find()
            .filter(E::id_column().eq(id))
            .one(self.db())
            .await?)
    }

    pub async fn find_where(&self, condition: Condition) -> Result<Vec<E::Model>, RepositoryError> {
        Ok(Self::live()
            .filter(condition)
            .order_by_desc(E::date_created_column())
            .all(self.db())
            .await?)
    }

    pub async fn find_one_where(
        &self,
        condition: Condition,
    ) -> Result<Option<E::Model>, RepositoryError> {
        Ok(Self::live().filter(condition).one(self.db()).await?)
    }

    /// Live rows, newest first.
    pub async fn list(&self, request: PageRequest) -> Result<Page<E::Model>, RepositoryError>
    where
        E::Model: Send + Sync + 'static,
    {
        let paginator = Self::live()
            .order_by_desc(E::date_created_column())
            .paginate(self.db(), request.page_size());

        let total = paginator.num_items().await?;
        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), total, request));
        }
        let items = paginator.fetch_page(request.page_index()).await?;

        Ok(Page::new(items, total, request))
    }

    pub async fn count(&self) -> Result<u64, RepositoryError>
    where
        E::Model: Send + Sync + 'static,
    {
        Ok(Self::live().count(self.db()).await?)
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, RepositoryError>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        Ok(model.insert(self.db()).await?)
    }

    pub async fn update<A>(&self, model: A) -> Result<E::Model, RepositoryError>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        Ok(model.update(self.db()).await?)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let affected = self
            .soft_delete_where(Condition::all().add(E::id_column().eq(id)))
            .await?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Soft-deletes every live row matching `condition`; returns how many.
    pub async fn soft_delete_where(&self, condition: Condition) -> Result<u64, RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().fixed_offset();

        let result = E::update_many()
            .col_expr(E::is_delete_column(), Expr::value(true))
            .col_expr(E::date_delete_column(), Expr::value(now))
            .col_expr(E::date_updated_column(), Expr::value(now))
            .filter(E::is_delete_column().eq(false))
            .filter(condition)
            .exec(self.db())
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn restore(&self, id: Uuid) -> Result<(), RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().fixed_offset();

        let result = E::update_many()
            .col_expr(E::is_delete_column(), Expr::value(false))
            .col_expr(
                E::date_delete_column(),
                Expr::value(Option::<DateTimeWithTimeZone>::None),
            )
            .col_expr(E::date_updated_column(), Expr::value(now))
            .filter(E::id_column().eq(id))
            .filter(E::is_delete_column().eq(true))
            .exec(self.db())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Physical delete, regardless of soft-delete state.
    pub async fn hard_delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(self.db())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Physically removes rows soft-deleted before `cutoff`.
    pub async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = E::delete_many()
            .filter(E::is_delete_column().eq(true))
            .filter(E::date_delete_column().lt(cutoff.fixed_offset()))
            .exec(self.db())
            .await?;

        Ok(result.rows_affected)
    }
}

// ============================================================================
// Tests
// ============================================================================
