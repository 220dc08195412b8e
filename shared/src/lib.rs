//! Shared types for the catalog workspace
//!
//! Wire models of the catalog REST API, response envelopes, error types and
//! the pure filter/pagination logic used by the catalog client.

pub mod catalog;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use catalog::{
    DEFAULT_PAGE_SIZE, FilterEdit, FilterState, PAGE_SIZE_OPTIONS, PageAction, PageItem,
    PriceRange, ProductQuery,
};
pub use error::{ApiErrorBody, ParseError};
pub use models::{Brand, Category, EntityRef, Named, Product};
pub use response::{BrandList, CategoryList, Pagination, ProductPage};
