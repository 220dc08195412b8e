//! Product counts per category / brand
//!
//! One `limit = 1` probe per entry; the count is the reported total.

use std::collections::HashMap;

use futures::future::join_all;
use shared::{Brand, Category, Named, ProductQuery};

use crate::http::CatalogApi;

/// Count products for each entry of `items` using `probe` to build the query.
/// Failed probes count as zero.
pub async fn product_counts<T, F>(api: &dyn CatalogApi, items: &[T], probe: F) -> HashMap<String, u64>
where
    T: Named,
    F: Fn(&str) -> ProductQuery,
{
    let requests = items.iter().map(|item| {
        let query = probe(item.id());
        async move {
            let total = match api.list_products(&query).await {
                Ok(page) => page.pagination.total,
                Err(e) => {
                    tracing::warn!(id = item.id(), error = %e, "product count failed");
                    0
                }
            };
            (item.id().to_string(), total)
        }
    });
    join_all(requests).await.into_iter().collect()
}

pub async fn category_counts(api: &dyn CatalogApi, categories: &[Category]) -> HashMap<String, u64> {
    product_counts(api, categories, |id: &str| ProductQuery::count_in_category(id)).await
}

pub async fn brand_counts(api: &dyn CatalogApi, brands: &[Brand]) -> HashMap<String, u64> {
    product_counts(api, brands, |id: &str| ProductQuery::count_in_brand(id)).await
}
