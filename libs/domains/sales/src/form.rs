//! Multipart decoding for the add and modify forms.

use axum::extract::Multipart;
use chrono::NaiveDate;
use domain_files::NewFile;
use uuid::Uuid;

use crate::error::{SaleError, SaleResult};
use crate::models::{CreateSale, UpdateSale};

/// Raw form contents before the add/modify rules are applied
#[derive(Debug, Default)]
pub struct SaleFormData {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub discount: Option<f64>,
    /// `Some` as soon as one `products` field was sent, even if empty
    pub products: Option<Vec<Uuid>>,
    pub image: Option<NewFile>,
}

impl SaleFormData {
    /// Unknown fields are skipped. An image part without a file name and
    /// without bytes (an untouched file input) counts as absent.
    pub async fn from_multipart(mut multipart: Multipart) -> SaleResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "image" => {
                    let file = NewFile::from_field(field).await?;
                    if !(file.name.is_empty() && file.bytes.is_empty()) {
                        form.image = Some(file);
                    }
                }
                "name" => form.name = Some(field.text().await?.trim().to_string()),
                "date" => form.date = Some(parse_date("date", &field.text().await?)?),
                "expirationDate" | "expiration_date" => {
                    form.expiration_date =
                        Some(parse_date("expirationDate", &field.text().await?)?)
                }
                "discount" => form.discount = Some(parse_discount(&field.text().await?)?),
                "products" | "products[]" => {
                    let ids = parse_products(&field.text().await?)?;
                    form.products.get_or_insert_with(Vec::new).extend(ids);
                }
                other => tracing::debug!(field = other, "Ignoring unknown sale form field"),
            }
        }

        Ok(form)
    }

    pub fn into_create(self) -> SaleResult<(CreateSale, NewFile)> {
        let input = CreateSale {
            name: self.name.ok_or(SaleError::MissingField("name"))?,
            date: self.date.ok_or(SaleError::MissingField("date"))?,
            expiration_date: self
                .expiration_date
                .ok_or(SaleError::MissingField("expirationDate"))?,
            discount: self.discount.ok_or(SaleError::MissingField("discount"))?,
            products: self.products.unwrap_or_default(),
        };
        let image = self.image.ok_or(SaleError::MissingField("image"))?;
        Ok((input, image))
    }

    pub fn into_update(self) -> (UpdateSale, Option<NewFile>) {
        let update = UpdateSale {
            name: self.name,
            date: self.date,
            expiration_date: self.expiration_date,
            discount: self.discount,
            products: self.products,
        };
        (update, self.image)
    }
}

fn parse_date(field: &'static str, value: &str) -> SaleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SaleError::Validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

fn parse_discount(value: &str) -> SaleResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| SaleError::Validation(format!("discount must be a number, got '{value}'")))
}

/// Accepts one id or a comma-separated list; blank entries are skipped
fn parse_products(value: &str) -> SaleResult<Vec<Uuid>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            Uuid::parse_str(id)
                .map_err(|_| SaleError::Validation(format!("'{id}' is not a product id")))
        })
        .collect()
}
