use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::PhoneNumber).string_len(20).null())
                    .col(ColumnDef::new(Users::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    // JSON array of role names, e.g. ["admin","user"]
                    .col(
                        ColumnDef::new(Users::Roles)
                            .text()
                            .not_null()
                            .default("[\"user\"]"),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::DateCreated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::CreatorId).uuid().null())
                    .col(
                        ColumnDef::new(Users::IsDelete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::DateDelete)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::DateUpdated)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================
        // INDEXES
        // ============================================

        // A soft-deleted user frees up the email for a new account
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_users_email_live
                ON users (email)
                WHERE is_delete = false;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_date_created
                ON users (date_created DESC)
                WHERE is_delete = false;
                "#,
            )
            .await?;

        // Used by the purge job
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_date_delete
                ON users (date_delete)
                WHERE is_delete = true;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_users_email_live;
                DROP INDEX IF EXISTS idx_users_date_created;
                DROP INDEX IF EXISTS idx_users_date_delete;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    PasswordHash,
    Roles,
    IsActive,
    DateCreated,
    CreatorId,
    IsDelete,
    DateDelete,
    DateUpdated,
}
