//! Product listing request parameters
//!
//! [`ProductQuery::from`] is the single translation point from
//! [`FilterState`] to `GET /api/products` parameters.

use serde::{Deserialize, Serialize};

use super::{DEFAULT_PAGE_SIZE, FilterState};

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Query string of `GET /api/products`
///
/// Absent fields are omitted rather than sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ProductQuery {
    /// Smallest query that still reports `pagination.total` for one category
    pub fn count_in_category(id: impl Into<String>) -> Self {
        Self {
            category: Some(id.into()),
            ..Self::probe()
        }
    }

    /// Smallest query that still reports `pagination.total` for one brand
    pub fn count_in_brand(id: impl Into<String>) -> Self {
        Self {
            brand: Some(id.into()),
            ..Self::probe()
        }
    }

    fn probe() -> Self {
        Self {
            search: None,
            category: None,
            brand: None,
            min_price: None,
            max_price: None,
            page: 1,
            limit: 1,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl From<&FilterState> for ProductQuery {
    fn from(filters: &FilterState) -> Self {
        let (min_price, max_price) = match filters.price_range {
            Some(range) => (Some(range.min()), range.max()),
            None => (None, None),
        };

        Self {
            search: non_empty(&filters.search),
            category: filters.category.as_deref().and_then(non_empty),
            brand: filters.brand.as_deref().and_then(non_empty),
            min_price,
            max_price,
            page: filters.page.max(1),
            limit: filters.limit,
        }
    }
}
