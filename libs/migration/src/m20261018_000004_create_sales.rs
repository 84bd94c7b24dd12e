use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261018_000001_create_files::Files;
use crate::m20261018_000003_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(pk_uuid(Sales::Id))
                    .col(string(Sales::Name))
                    .col(uuid_null(Sales::ImageId))
                    .col(date(Sales::Date))
                    .col(date(Sales::ExpirationDate))
                    .col(double(Sales::Discount))
                    .col(
                        timestamp_with_time_zone(Sales::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Sales::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_image_id")
                            .from(Sales::Table, Sales::ImageId)
                            .to(Files::Table, Files::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_name")
                    .table(Sales::Table)
                    .col(Sales::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleProducts::Table)
                    .if_not_exists()
                    .col(uuid(SaleProducts::SaleId))
                    .col(uuid(SaleProducts::ProductId))
                    .primary_key(
                        Index::create()
                            .col(SaleProducts::SaleId)
                            .col(SaleProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_products_sale_id")
                            .from(SaleProducts::Table, SaleProducts::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_products_product_id")
                            .from(SaleProducts::Table, SaleProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER sales_touch_updated_at
                    BEFORE UPDATE ON sales
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleProducts::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS sales_touch_updated_at ON sales")
            .await?;

        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    Name,
    ImageId,
    Date,
    ExpirationDate,
    Discount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SaleProducts {
    Table,
    SaleId,
    ProductId,
}
