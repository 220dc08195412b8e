use std::collections::HashMap;

use catalog_client::navigation::build_href;
use catalog_client::reconcile::{BRAND_PARAM, CATEGORY_PARAM};
use catalog_client::view::LOAD_FAILED_MESSAGE;
use catalog_client::{
    CatalogApi, CatalogView, ClientConfig, FetchOutcome, LISTING_PATH, MemoryHistory,
    TracingNotifier, brand_counts, category_counts, init_logger,
};
use clap::Parser;
use shared::{FilterEdit, Named, PageItem, PriceRange};

/// Browse the product catalog from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// API base URL
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Category id
    #[arg(long)]
    category: Option<String>,

    /// Brand id
    #[arg(long)]
    brand: Option<String>,

    /// Price range token, e.g. "300-1000" or "5000-above"
    #[arg(long)]
    price_range: Option<PriceRange>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Products per page
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also print product counts per category and brand
    #[arg(long)]
    counts: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logger(&args.log_level)?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    if let Some(limit) = args.limit {
        config = config.with_page_size(limit);
    }
    let api = config.build_http_client()?;
    tracing::debug!(base_url = %api.base_url(), "catalog client ready");

    // Category and brand arrive as route parameters, like a shared link
    let mut pairs = Vec::new();
    if let Some(category) = &args.category {
        pairs.push((CATEGORY_PARAM, category.as_str()));
    }
    if let Some(brand) = &args.brand {
        pairs.push((BRAND_PARAM, brand.as_str()));
    }
    let mut history = MemoryHistory::new(&build_href(LISTING_PATH, pairs));

    let notifier = TracingNotifier;
    let mut view = CatalogView::new(config.page_size);
    view.sync_location(&mut history, &notifier);
    if let Some(search) = args.search {
        view.edit(FilterEdit::Search(search));
    }
    if let Some(range) = args.price_range {
        view.edit(FilterEdit::PriceRange(Some(range)));
    }
    view.go_to_page(args.page);

    let (categories, brands) = tokio::join!(
        api.list_categories(config.lookup_limit),
        api.list_brands(config.lookup_limit)
    );
    view.set_categories(categories);
    view.set_brands(brands);

    let ticket = view.refresh();
    let result = api.list_products(&ticket.query).await;
    if view.complete(ticket, result, &notifier) == FetchOutcome::Failed {
        anyhow::bail!(LOAD_FAILED_MESSAGE);
    }
    print_listing(&view);

    if args.counts {
        let (by_category, by_brand) = tokio::join!(
            category_counts(&api, view.categories()),
            brand_counts(&api, view.brands())
        );
        println!();
        print_counts("Categories", view.categories(), &by_category);
        print_counts("Brands", view.brands(), &by_brand);
    }

    Ok(())
}

fn print_listing(view: &CatalogView) {
    for tag in view.active_filters() {
        println!("[{}]", tag.label());
    }

    if view.products().is_empty() {
        println!("No products found");
    }
    for product in view.products() {
        let mut line = format!("{:<40} {:>10.2}", product.name, product.display_price());
        if product.has_discount() {
            line.push_str(&format!("  (was {:.2})", product.price));
        }
        if let Some(brand) = product.brand_name() {
            line.push_str(&format!("  {brand}"));
        }
        println!("{line}");
    }

    println!();
    println!("{}", view.summary());
    let pagination = view.pagination();
    if pagination.is_paginated() {
        let strip: Vec<String> = pagination
            .strip()
            .into_iter()
            .map(|item| match item {
                PageItem::Page { number, active: true } => format!("[{number}]"),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::Ellipsis => "...".to_string(),
            })
            .collect();
        println!("{}", strip.join(" "));
    }
}

fn print_counts<T: Named>(title: &str, items: &[T], counts: &HashMap<String, u64>) {
    println!("{title}:");
    for item in items {
        let count = counts.get(item.id()).copied().unwrap_or(0);
        println!("  {:<30} {count}", item.name());
    }
}
