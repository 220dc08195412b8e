// catalog-client/src/view.rs
// Catalog view state: filters, fetch cycle and lookup lists

use shared::models::resolve_name;
use shared::{
    Brand, Category, FilterEdit, FilterState, PageAction, Pagination, PriceRange, Product,
    ProductPage, ProductQuery,
};

use crate::ClientResult;
use crate::navigation::{LISTING_PATH, Location, Navigator, build_href};
use crate::notify::{Notice, Notifier};
use crate::reconcile::{BRAND_PARAM, CATEGORY_PARAM, SourceReconciler};

/// Notice shown when a product fetch fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products";

/// Products and pagination of one successful fetch
///
/// Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// An issued product request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: ProductQuery,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer request was issued meanwhile; the result was dropped
    Superseded,
}

/// Active filter tag with a removable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Search(String),
    Category { id: String, name: Option<String> },
    Brand { id: String, name: Option<String> },
    Price(PriceRange),
}

impl ActiveFilter {
    pub fn label(&self) -> String {
        match self {
            Self::Search(text) => format!("Search: \"{}\"", text),
            Self::Category { id, name } => format!("Category: {}", name.as_deref().unwrap_or(id)),
            Self::Brand { id, name } => format!("Brand: {}", name.as_deref().unwrap_or(id)),
            Self::Price(range) => format!("Price: {}", range.label()),
        }
    }

    /// Edit that removes this tag
    pub fn clear_edit(&self) -> FilterEdit {
        match self {
            Self::Search(_) => FilterEdit::Search(String::new()),
            Self::Category { .. } => FilterEdit::Category(None),
            Self::Brand { .. } => FilterEdit::Brand(None),
            Self::Price(_) => FilterEdit::PriceRange(None),
        }
    }
}

/// Published view state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub filters: FilterState,
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub loading: bool,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Catalog listing state machine
///
/// Owns the [`FilterState`]; all mutation goes through here. Fetches are
/// split into [`CatalogView::begin_fetch`] and [`CatalogView::complete`] so
/// the caller decides how requests run; only the latest issued generation
/// may change the snapshot.
#[derive(Debug, Clone)]
pub struct CatalogView {
    filters: FilterState,
    reconciler: SourceReconciler,
    last_location: Option<Location>,
    snapshot: CatalogSnapshot,
    categories: Vec<Category>,
    brands: Vec<Brand>,
    issued: u64,
    requested: Option<FilterState>,
    loading: bool,
}

impl CatalogView {
    pub fn new(page_size: u32) -> Self {
        let filters = FilterState::with_limit(page_size);
        Self {
            snapshot: CatalogSnapshot {
                products: Vec::new(),
                pagination: Pagination::empty(filters.limit),
            },
            filters,
            reconciler: SourceReconciler::new(),
            last_location: None,
            categories: Vec::new(),
            brands: Vec::new(),
            issued: 0,
            requested: None,
            loading: false,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    pub fn pagination(&self) -> &Pagination {
        &self.snapshot.pagination
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    // ========== Filter sources ==========

    /// Reconcile the router's current location into the filter state.
    ///
    /// Runs only when the location differs from the last one processed.
    /// Locations written by the view itself are recorded as processed.
    /// Returns whether the filters changed.
    pub fn sync_location(&mut self, navigator: &mut dyn Navigator, notifier: &dyn Notifier) -> bool {
        let location = navigator.location();
        if self.last_location.as_ref() == Some(&location) {
            return false;
        }

        let outcome = self.reconciler.reconcile(&self.filters, &location);
        for notice in outcome.notices {
            notifier.notify(notice);
        }

        let mut changed = false;
        if let Some(next) = outcome.filters {
            changed = next != self.filters;
            self.filters = next;
        }

        let mut processed = location;
        if let Some(generation) = outcome.consumed {
            let href = self.filter_href(&processed.path);
            if navigator.replace_if(&processed, &href) {
                processed = Location::parse(&href);
            } else {
                // History moved on; the new entry is reconciled on the next sync
                tracing::debug!(generation, "location changed before rewrite");
                navigator.acknowledge(generation);
            }
        }
        self.last_location = Some(processed);
        changed
    }

    /// Apply a change from the filter controls (resets to page 1)
    pub fn edit(&mut self, edit: FilterEdit) {
        self.filters.apply(edit);
    }

    /// Follow a page control; disabled controls are ignored
    pub fn change_page(&mut self, action: PageAction) -> bool {
        match self.snapshot.pagination.target(action) {
            Some(page) => {
                self.filters.go_to_page(page);
                true
            }
            None => false,
        }
    }

    /// Set the page directly, without consulting the current pagination
    pub fn go_to_page(&mut self, page: u32) {
        self.filters.go_to_page(page);
    }

    /// Reset all filters and drop the query string from the route
    pub fn clear_all(&mut self, navigator: &mut dyn Navigator) {
        self.filters.clear();
        navigator.replace(LISTING_PATH);
        self.last_location = Some(Location::parse(LISTING_PATH));
    }

    fn filter_href(&self, path: &str) -> String {
        let mut pairs = Vec::with_capacity(2);
        if let Some(category) = &self.filters.category {
            pairs.push((CATEGORY_PARAM, category.as_str()));
        }
        if let Some(brand) = &self.filters.brand {
            pairs.push((BRAND_PARAM, brand.as_str()));
        }
        build_href(path, pairs)
    }

    // ========== Fetch cycle ==========

    /// Issue a request if the filters differ from the last requested ones
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.requested.as_ref() == Some(&self.filters) {
            return None;
        }
        Some(self.issue())
    }

    /// Issue a request for the current filters unconditionally
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.requested = Some(self.filters.clone());
        let query = ProductQuery::from(&self.filters);
        tracing::debug!(
            generation = self.issued,
            query = %serde_json::to_string(&query).unwrap_or_default(),
            "requesting products"
        );
        FetchTicket {
            generation: self.issued,
            query,
        }
    }

    /// Apply the result of `ticket` unless a newer request was issued
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<ProductPage>,
        notifier: &dyn Notifier,
    ) -> FetchOutcome {
        if ticket.generation != self.issued {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.issued,
                "discarding superseded product response"
            );
            return FetchOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.snapshot = CatalogSnapshot {
                    products: page.products,
                    pagination: page.pagination,
                };
                FetchOutcome::Applied
            }
            Err(e) => {
                // `requested` stays set: only a filter change or `refresh` asks again
                tracing::warn!(generation = ticket.generation, error = %e, "product fetch failed");
                notifier.notify(Notice::error(LOAD_FAILED_MESSAGE));
                FetchOutcome::Failed
            }
        }
    }

    // ========== Lookup lists ==========

    pub fn set_categories(&mut self, result: ClientResult<Vec<Category>>) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::warn!(error = %e, "failed to load categories"),
        }
    }

    pub fn set_brands(&mut self, result: ClientResult<Vec<Brand>>) {
        match result {
            Ok(brands) => self.brands = brands,
            Err(e) => tracing::warn!(error = %e, "failed to load brands"),
        }
    }

    // ========== Derived ==========

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    /// Active filter tags in control order
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.filters.search.is_empty() {
            active.push(ActiveFilter::Search(self.filters.search.clone()));
        }
        if let Some(id) = &self.filters.category {
            active.push(ActiveFilter::Category {
                id: id.clone(),
                name: resolve_name(&self.categories, id).map(str::to_string),
            });
        }
        if let Some(id) = &self.filters.brand {
            active.push(ActiveFilter::Brand {
                id: id.clone(),
                name: resolve_name(&self.brands, id).map(str::to_string),
            });
        }
        if let Some(range) = self.filters.price_range {
            active.push(ActiveFilter::Price(range));
        }
        active
    }

    /// "Showing N of M products"
    pub fn summary(&self) -> String {
        self.snapshot.pagination.summary(self.snapshot.products.len())
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            filters: self.filters.clone(),
            products: self.snapshot.products.clone(),
            pagination: self.snapshot.pagination,
            loading: self.loading,
            categories: self.categories.clone(),
            brands: self.brands.clone(),
        }
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(shared::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use crate::navigation::{FilterIntent, MemoryHistory};
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.0.lock().iter().map(|n| n.message.clone()).collect()
        }
    }

    fn page_of(names: &[&str], pagination: Pagination) -> ProductPage {
        let products = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product::new(format!("p{i}"), *name, Decimal::from(10)))
            .collect();
        ProductPage::new(products, pagination)
    }

    #[test]
    fn test_intent_scenario_overrides_url_and_rewrites_route() {
        let notices = Recorder::default();
        let mut history = MemoryHistory::new("/products?category=C9");
        let mut view = CatalogView::default();
        view.sync_location(&mut history, &notices);
        assert_eq!(view.filters().category.as_deref(), Some("C9"));

        history.push_with_intent("/products?category=C9", FilterIntent::brand("B1", "Acme"));
        assert!(view.sync_location(&mut history, &notices));

        assert_eq!(view.filters().category, None);
        assert_eq!(view.filters().brand.as_deref(), Some("B1"));
        assert_eq!(view.filters().page, 1);
        assert!(notices.messages().iter().any(|m| m.contains("Acme")));

        let location = history.location();
        assert!(location.intent.is_none());
        assert_eq!(location.href(), "/products?brand=B1");

        // The rewritten route is not reprocessed
        assert!(!view.sync_location(&mut history, &notices));
        assert_eq!(notices.messages().len(), 1);
    }

    #[test]
    fn test_back_and_forward_do_not_reapply_intent() {
        let notices = Recorder::default();
        let mut history = MemoryHistory::new("/categories");
        history.push_with_intent("/products", FilterIntent::category("c1", "Phones"));

        let mut view = CatalogView::default();
        view.sync_location(&mut history, &notices);
        view.edit(FilterEdit::Category(None));

        history.back();
        view.sync_location(&mut history, &notices);
        history.forward();
        view.sync_location(&mut history, &notices);

        assert_eq!(notices.messages().len(), 1);
    }

    /// Pushes a new entry right before the view rewrites the current one
    struct PushBeforeRewrite {
        history: MemoryHistory,
        pending: Option<FilterIntent>,
    }

    impl Navigator for PushBeforeRewrite {
        fn location(&self) -> Location {
            self.history.location()
        }

        fn replace(&mut self, href: &str) {
            self.history.replace(href)
        }

        fn acknowledge(&mut self, generation: u64) {
            self.history.acknowledge(generation)
        }

        fn replace_if(&mut self, expected: &Location, href: &str) -> bool {
            if let Some(intent) = self.pending.take() {
                self.history.push_with_intent("/products", intent);
            }
            self.history.replace_if(expected, href)
        }
    }

    #[test]
    fn test_entry_pushed_during_rewrite_keeps_its_intent() {
        let notices = Recorder::default();
        let mut history = MemoryHistory::new("/categories");
        history.push_with_intent("/products", FilterIntent::category("c1", "Phones"));
        let mut navigator = PushBeforeRewrite {
            history,
            pending: Some(FilterIntent::brand("B1", "Acme")),
        };

        let mut view = CatalogView::default();
        assert!(view.sync_location(&mut navigator, &notices));
        assert_eq!(view.filters().category.as_deref(), Some("c1"));
        assert!(navigator.location().intent.is_some());

        assert!(view.sync_location(&mut navigator, &notices));
        assert_eq!(view.filters().category, None);
        assert_eq!(view.filters().brand.as_deref(), Some("B1"));
        assert_eq!(navigator.location().href(), "/products?brand=B1");
        assert_eq!(notices.messages().len(), 2);
    }

    #[test]
    fn test_clear_all_resets_filters_and_route() {
        let notices = Recorder::default();
        let mut history = MemoryHistory::new("/products?brand=b1&category=c1");
        let mut view = CatalogView::default();
        view.sync_location(&mut history, &notices);
        view.edit(FilterEdit::Search("desk".into()));

        view.clear_all(&mut history);
        assert_eq!(view.filters(), &FilterState::default());
        assert_eq!(history.location().href(), LISTING_PATH);
        assert!(!view.sync_location(&mut history, &notices));
    }

    #[test]
    fn test_begin_fetch_only_on_value_change() {
        let mut view = CatalogView::default();
        let first = view.begin_fetch().unwrap();
        assert_eq!(first.generation, 1);
        assert!(view.is_loading());
        assert!(view.begin_fetch().is_none());

        view.edit(FilterEdit::Search("a".into()));
        view.edit(FilterEdit::Search(String::new()));
        assert!(view.begin_fetch().is_none());

        view.edit(FilterEdit::Limit(24));
        assert_eq!(view.begin_fetch().unwrap().query.limit, 24);
    }

    #[test]
    fn test_out_of_order_responses_keep_latest() {
        let notices = Recorder::default();
        let mut view = CatalogView::default();
        let first = view.begin_fetch().unwrap();
        view.edit(FilterEdit::Search("phone".into()));
        let second = view.begin_fetch().unwrap();

        let outcome = view.complete(second, Ok(page_of(&["Phone X"], Pagination::new(1, 12, 1))), &notices);
        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!view.is_loading());

        let outcome = view.complete(first, Ok(page_of(&["Old", "Stale"], Pagination::new(1, 12, 2))), &notices);
        assert_eq!(outcome, FetchOutcome::Superseded);
        assert_eq!(view.products().len(), 1);
        assert_eq!(view.products()[0].name, "Phone X");
        assert_eq!(view.pagination().total, 1);
    }

    #[test]
    fn test_stale_completion_keeps_loading() {
        let notices = Recorder::default();
        let mut view = CatalogView::default();
        let first = view.begin_fetch().unwrap();
        view.edit(FilterEdit::Search("x".into()));
        let _second = view.begin_fetch().unwrap();

        view.complete(first, Ok(ProductPage::default()), &notices);
        assert!(view.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let notices = Recorder::default();
        let mut view = CatalogView::default();
        let ticket = view.begin_fetch().unwrap();
        view.complete(ticket, Ok(page_of(&["Lamp"], Pagination::new(1, 12, 1))), &notices);

        view.edit(FilterEdit::Search("desk".into()));
        let ticket = view.begin_fetch().unwrap();
        let outcome = view.complete(ticket, Err(ClientError::Internal("boom".into())), &notices);

        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!view.is_loading());
        assert_eq!(view.products()[0].name, "Lamp");
        assert_eq!(notices.messages(), [LOAD_FAILED_MESSAGE]);

        // Unchanged filters are not re-requested; refresh retries explicitly
        assert!(view.begin_fetch().is_none());
        let retry = view.refresh();
        assert_eq!(retry.query.search.as_deref(), Some("desk"));
        assert!(view.is_loading());
    }

    #[test]
    fn test_change_page_respects_boundaries() {
        let notices = Recorder::default();
        let mut view = CatalogView::default();
        let ticket = view.begin_fetch().unwrap();
        view.complete(ticket, Ok(page_of(&["a"], Pagination::new(1, 12, 84))), &notices);

        assert!(!view.change_page(PageAction::Prev));
        assert!(view.change_page(PageAction::Last));
        assert_eq!(view.filters().page, 7);
        assert_eq!(view.begin_fetch().unwrap().query.page, 7);
    }

    #[test]
    fn test_active_filters_resolve_names() {
        let mut view = CatalogView::default();
        view.set_categories(Ok(vec![Category::new("c1", "Phones")]));
        view.set_brands(Err(ClientError::Internal("down".into())));
        view.edit(FilterEdit::Search("pro".into()));
        view.edit(FilterEdit::Category(Some("c1".into())));
        view.edit(FilterEdit::Brand(Some("b1".into())));
        view.edit(FilterEdit::PriceRange(Some(PriceRange::PRESETS[0])));

        let labels: Vec<String> = view.active_filters().iter().map(ActiveFilter::label).collect();
        assert_eq!(
            labels,
            ["Search: \"pro\"", "Category: Phones", "Brand: b1", "Price: $0 - $300"]
        );

        let tag = view.active_filters().remove(1);
        view.edit(tag.clear_edit());
        assert_eq!(view.filters().category, None);
        assert!(view.has_active_filters());
    }

    #[test]
    fn test_summary() {
        let notices = Recorder::default();
        let mut view = CatalogView::default();
        let ticket = view.begin_fetch().unwrap();
        view.complete(ticket, Ok(page_of(&["a", "b"], Pagination::new(1, 12, 2))), &notices);
        assert_eq!(view.summary(), "Showing 2 of 2 products");
    }
}
