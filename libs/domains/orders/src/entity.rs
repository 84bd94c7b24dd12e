use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Order;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: i64,
    pub user_fio: String,
    pub user_phone_number: String,
    #[sea_orm(column_type = "Text")]
    pub user_address: String,
    #[sea_orm(column_type = "Text")]
    pub products_info: String,
    pub final_price: f64,
    pub order_status: String,
    pub order_type: String,
    pub order_date: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Order {
            id: model.id,
            user_id: model.user_id,
            user_fio: model.user_fio,
            user_phone_number: model.user_phone_number,
            user_address: model.user_address,
            products_info: model.products_info,
            final_price: model.final_price,
            order_status: model.order_status,
            order_type: model.order_type,
            order_date: model.order_date.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Order> for ActiveModel {
    fn from(order: Order) -> Self {
        ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            user_fio: Set(order.user_fio),
            user_phone_number: Set(order.user_phone_number),
            user_address: Set(order.user_address),
            products_info: Set(order.products_info),
            final_price: Set(order.final_price),
            order_status: Set(order.order_status),
            order_type: Set(order.order_type),
            order_date: Set(order.order_date.into()),
            updated_at: Set(order.updated_at.into()),
        }
    }
}
