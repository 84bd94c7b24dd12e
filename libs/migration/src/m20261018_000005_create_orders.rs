use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // user_id points at an external user service, hence no foreign key
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_uuid(Orders::Id))
                    .col(big_integer(Orders::UserId))
                    .col(string(Orders::UserFio))
                    .col(string(Orders::UserPhoneNumber))
                    .col(text(Orders::UserAddress))
                    .col(text(Orders::ProductsInfo).default(""))
                    .col(double(Orders::FinalPrice))
                    .col(string(Orders::OrderStatus).default("new"))
                    .col(string(Orders::OrderType).default(""))
                    .col(
                        timestamp_with_time_zone(Orders::OrderDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Orders::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_orders_user_id", Orders::UserId),
            ("idx_orders_order_status", Orders::OrderStatus),
            ("idx_orders_order_date", Orders::OrderDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Orders::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER orders_touch_updated_at
                    BEFORE UPDATE ON orders
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
            .execute_unprepared("DROP TRIGGER IF EXISTS orders_touch_updated_at ON orders")
            .await?;

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Orders {
    Table,
    Id,
    UserId,
    UserFio,
    UserPhoneNumber,
    UserAddress,
    ProductsInfo,
    FinalPrice,
    OrderStatus,
    OrderType,
    OrderDate,
    UpdatedAt,
}
