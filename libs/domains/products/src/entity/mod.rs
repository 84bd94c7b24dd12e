//! SeaORM entities for `products`, `animals` and `categories`

pub mod animal;
pub mod category;
pub mod product;
