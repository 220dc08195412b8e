//! Catalog query model
//!
//! Pure state and translation logic behind the product listing:
//! - [`FilterState`]: canonical product query owned by the catalog view
//! - [`PriceRange`]: symbolic price bucket (`0-300`, `5000-above`, ...)
//! - [`ProductQuery`]: request parameters of `GET /api/products`
//! - page strip derivation on [`crate::Pagination`]

mod filter;
mod pagination;
mod price;
mod query;

pub use filter::{DEFAULT_PAGE_SIZE, FilterEdit, FilterState, PAGE_SIZE_OPTIONS, sanitize_id};
pub use pagination::{PAGE_WINDOW, PageAction, PageItem};
pub use price::PriceRange;
pub use query::ProductQuery;
