pub mod sale;
pub mod sale_product;
