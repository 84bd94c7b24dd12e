use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261018_000001_create_files::Files;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // animal_id and category_id are plain references without foreign keys
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string(Products::Name))
                    .col(text(Products::Description).default(""))
                    .col(text(Products::Comments).default(""))
                    .col(double(Products::Price).check(Expr::col(Products::Price).gte(0.0)))
                    .col(integer(Products::Amount).check(Expr::col(Products::Amount).gte(0)))
                    .col(uuid_null(Products::CategoryId))
                    .col(uuid_null(Products::AnimalId))
                    .col(double(Products::Rating).default(0.0))
                    .col(uuid_null(Products::ImageId))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_image_id")
                            .from(Products::Table, Products::ImageId)
                            .to(Files::Table, Files::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_products_animal_id", Products::AnimalId),
            ("idx_products_category_id", Products::CategoryId),
            ("idx_products_price", Products::Price),
            ("idx_products_name", Products::Name),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Products::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER products_touch_updated_at
                    BEFORE UPDATE ON products
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS products_touch_updated_at ON products")
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
pub(crate) enum Products {
    Table,
    Id,
    Name,
    Description,
    Comments,
    Price,
    Amount,
    CategoryId,
    AnimalId,
    Rating,
    ImageId,
    CreatedAt,
    UpdatedAt,
}
