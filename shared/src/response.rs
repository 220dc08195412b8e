//! API Response types
//!
//! Listing envelopes returned by the catalog API.

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::models::{Brand, Category, Product};

/// Pagination metadata
///
/// Reported by the server; the client consumes these values verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-based)
    pub current: u32,
    /// Total number of pages
    pub pages: u32,
    /// Total number of matching items
    pub total: u64,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    /// Create a new pagination, deriving the page count
    pub fn new(current: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            current,
            pages,
            total,
            limit,
        }
    }

    /// Pagination of an empty result set
    pub fn empty(limit: u32) -> Self {
        Self::new(1, limit, 0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// `GET /api/products` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, pagination: Pagination) -> Self {
        Self {
            products,
            pagination,
        }
    }
}

/// `GET /api/categories` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// `GET /api/brands` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandList {
    pub brands: Vec<Brand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}
