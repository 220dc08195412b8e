//! Catalog Client - product listing client for the catalog REST API
//!
//! Keeps the listing filters in sync with the route, fetches products
//! without letting stale responses overwrite newer ones, and derives the
//! pagination strip and filter tags from the result.

pub mod cart;
pub mod config;
pub mod controller;
pub mod counts;
pub mod error;
pub mod http;
pub mod logger;
pub mod navigation;
pub mod notify;
pub mod reconcile;
pub mod view;

pub use cart::{Cart, CartHandle, CartItem};
pub use config::ClientConfig;
pub use controller::{CatalogCommand, CatalogController};
pub use counts::{brand_counts, category_counts, product_counts};
pub use error::{ClientError, ClientResult};
pub use http::{CatalogApi, NetworkCatalogClient};
pub use logger::init_logger;
pub use navigation::{FilterIntent, LISTING_PATH, Location, MemoryHistory, NamedFilter, Navigator};
pub use notify::{ChannelNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use reconcile::{Reconciliation, SourceReconciler};
pub use view::{ActiveFilter, CatalogSnapshot, CatalogView, FetchOutcome, FetchTicket, ViewState};
