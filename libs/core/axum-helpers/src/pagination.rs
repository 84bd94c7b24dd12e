//! Zero-based page requests and the page envelope returned by list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// The row offset `page_number * page_size` must fit a Postgres `BIGINT`.
///
/// Shared by every query type that carries its own page fields.
pub fn check_page_window(page_number: u64, page_size: u64) -> Result<(), ValidationError> {
    match page_number.checked_mul(page_size) {
        Some(offset) if offset <= i64::MAX as u64 => Ok(()),
        _ => {
            let mut err = ValidationError::new("page_out_of_range");
            err.message = Some("page_number * page_size exceeds the largest row offset".into());
            Err(err)
        }
    }
}

fn validate_page_window(params: &PageParams) -> Result<(), ValidationError> {
    check_page_window(params.page_number, params.page_size)
}

/// `?page_number=0&page_size=20`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_page_window"))]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u64,
}

impl PageParams {
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page_number.saturating_mul(self.page_size)
    }

    /// Cut this page out of an already ordered slice
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .iter()
            .skip(start)
            .take(self.page_size as usize)
            .cloned()
            .collect()
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, params: PageParams, total_elements: u64) -> Self {
        let total_pages = if params.page_size == 0 {
            0
        } else {
            total_elements.div_ceil(params.page_size)
        };

        Self {
            content,
            page_number: params.page_number,
            page_size: params.page_size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
