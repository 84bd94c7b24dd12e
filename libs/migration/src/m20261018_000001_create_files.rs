use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(pk_uuid(Files::Id))
                    .col(string(Files::Name))
                    .col(string(Files::ContentType))
                    .col(big_integer(Files::SizeBytes))
                    .col(ColumnDef::new(Files::Content).blob().not_null())
                    .col(
                        timestamp_with_time_zone(Files::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup by name returns the latest upload
        manager
            .create_index(
                Index::create()
                    .name("idx_files_name_created_at")
                    .table(Files::Table)
                    .col(Files::Name)
                    .col(Files::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Files {
    Table,
    Id,
    Name,
    ContentType,
    SizeBytes,
    Content,
    CreatedAt,
}
