//! Filter source reconciliation
//!
//! Resolves the navigation intent and the URL query string of a
//! [`Location`] against the current [`FilterState`]. Priority within one
//! pass: intent, then URL. Manual edits are applied directly on the
//! filter state and never pass through here.

use shared::FilterState;
use shared::catalog::sanitize_id;

use crate::navigation::{Location, NamedFilter};
use crate::notify::Notice;

/// Query parameter carrying the category filter
pub const CATEGORY_PARAM: &str = "category";
/// Query parameter carrying the brand filter
pub const BRAND_PARAM: &str = "brand";

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Replacement filter state, if any source changed it
    pub filters: Option<FilterState>,
    /// Notices to surface for applied intents
    pub notices: Vec<Notice>,
    /// Intent generation that must be acknowledged to the router
    pub consumed: Option<u64>,
}

/// Reconciles navigation intent and URL parameters into filter state
#[derive(Debug, Clone, Default)]
pub struct SourceReconciler {
    last_consumed: Option<u64>,
}

impl SourceReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the last applied intent
    pub fn last_consumed(&self) -> Option<u64> {
        self.last_consumed
    }

    pub fn reconcile(&mut self, current: &FilterState, location: &Location) -> Reconciliation {
        if let Some(stamped) = &location.intent {
            let generation = stamped.generation;
            if self.last_consumed.is_some_and(|last| generation <= last) {
                // Already applied; only make sure the router forgets it
                tracing::debug!(generation, "navigation intent already consumed");
                return Reconciliation {
                    consumed: Some(generation),
                    ..Reconciliation::default()
                };
            }
            self.last_consumed = Some(generation);

            let category = stamped.intent.category.as_ref().and_then(valid_filter);
            let brand = stamped.intent.brand.as_ref().and_then(valid_filter);
            if category.is_none() && brand.is_none() {
                return Reconciliation {
                    consumed: Some(generation),
                    ..Reconciliation::default()
                };
            }

            let mut notices = Vec::new();
            if let Some(filter) = category {
                notices.push(Notice::info(format!(
                    "Showing products from category: {}",
                    filter.name
                )));
            }
            if let Some(filter) = brand {
                notices.push(Notice::info(format!(
                    "Showing products from brand: {}",
                    filter.name
                )));
            }

            let next = FilterState {
                category: category.map(|f| f.id.trim().to_string()),
                brand: brand.map(|f| f.id.trim().to_string()),
                page: 1,
                ..current.clone()
            };
            tracing::info!(
                generation,
                category = ?next.category,
                brand = ?next.brand,
                "applied navigation intent"
            );
            return Reconciliation {
                filters: Some(next),
                notices,
                consumed: Some(generation),
            };
        }

        let mut next = current.clone();
        let mut changed = false;
        if let Some(id) = location.query_param(CATEGORY_PARAM).and_then(sanitize_id)
            && next.category.as_deref() != Some(id.as_str())
        {
            next.category = Some(id);
            changed = true;
        }
        if let Some(id) = location.query_param(BRAND_PARAM).and_then(sanitize_id)
            && next.brand.as_deref() != Some(id.as_str())
        {
            next.brand = Some(id);
            changed = true;
        }

        if !changed {
            return Reconciliation::default();
        }
        next.page = 1;
        tracing::debug!(category = ?next.category, brand = ?next.brand, "filters taken from URL");
        Reconciliation {
            filters: Some(next),
            ..Reconciliation::default()
        }
    }
}

fn valid_filter(filter: &NamedFilter) -> Option<&NamedFilter> {
    sanitize_id(&filter.id).map(|_| filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{FilterIntent, StampedIntent};
    use shared::FilterEdit;

    fn with_intent(href: &str, generation: u64, intent: FilterIntent) -> Location {
        let mut location = Location::parse(href);
        location.intent = Some(StampedIntent { generation, intent });
        location
    }

    #[test]
    fn test_intent_overrides_url() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.apply(FilterEdit::Category(Some("C9".into())));
        current.go_to_page(3);

        let location = with_intent("/products?category=C9", 1, FilterIntent::brand("B1", "Acme"));
        let outcome = reconciler.reconcile(&current, &location);

        let next = outcome.filters.unwrap();
        assert_eq!(next.category, None);
        assert_eq!(next.brand.as_deref(), Some("B1"));
        assert_eq!(next.page, 1);
        assert_eq!(outcome.consumed, Some(1));
        assert_eq!(outcome.notices.len(), 1);
        assert!(outcome.notices[0].message.contains("Acme"));
    }

    #[test]
    fn test_intent_keeps_search_and_price() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.apply(FilterEdit::Search("lamp".into()));

        let location = with_intent("/products", 4, FilterIntent::category("c1", "Lighting"));
        let next = reconciler.reconcile(&current, &location).filters.unwrap();
        assert_eq!(next.search, "lamp");
        assert_eq!(next.category.as_deref(), Some("c1"));
    }

    #[test]
    fn test_intent_applied_once() {
        let mut reconciler = SourceReconciler::new();
        let current = FilterState::default();
        let location = with_intent("/products", 7, FilterIntent::category("c1", "Phones"));

        let first = reconciler.reconcile(&current, &location);
        assert!(first.filters.is_some());

        let again = reconciler.reconcile(&FilterState::default(), &location);
        assert_eq!(again.filters, None);
        assert!(again.notices.is_empty());
        assert_eq!(again.consumed, Some(7));
        assert_eq!(reconciler.last_consumed(), Some(7));
    }

    #[test]
    fn test_intent_with_both_filters_notifies_twice() {
        let mut reconciler = SourceReconciler::new();
        let intent = FilterIntent {
            category: Some(NamedFilter::new("c1", "Phones")),
            brand: Some(NamedFilter::new("b1", "Acme")),
        };
        let outcome = reconciler.reconcile(&FilterState::default(), &with_intent("/products", 1, intent));
        let messages: Vec<&str> = outcome.notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Showing products from category: Phones",
                "Showing products from brand: Acme"
            ]
        );
    }

    #[test]
    fn test_empty_intent_is_consumed_without_change() {
        let mut reconciler = SourceReconciler::new();
        let intent = FilterIntent::category("  ", "Nothing");
        let outcome = reconciler.reconcile(&FilterState::default(), &with_intent("/products?brand=b1", 2, intent));
        assert_eq!(outcome.filters, None);
        assert_eq!(outcome.consumed, Some(2));
    }

    #[test]
    fn test_url_params_update_filters() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.go_to_page(2);

        let outcome = reconciler.reconcile(&current, &Location::parse("/products?brand=b1"));
        let next = outcome.filters.unwrap();
        assert_eq!(next.brand.as_deref(), Some("b1"));
        assert_eq!(next.page, 1);
        assert_eq!(outcome.consumed, None);
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn test_url_matching_state_is_noop() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.apply(FilterEdit::Brand(Some("b1".into())));
        current.go_to_page(4);

        let outcome = reconciler.reconcile(&current, &Location::parse("/products?brand=b1"));
        assert_eq!(outcome, Reconciliation::default());
    }

    #[test]
    fn test_malformed_url_values_ignored() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.apply(FilterEdit::Category(Some("c1".into())));

        let outcome = reconciler.reconcile(&current, &Location::parse("/products?category=&brand=%20%20"));
        assert_eq!(outcome.filters, None);
    }

    #[test]
    fn test_absent_url_params_do_not_clear() {
        let mut reconciler = SourceReconciler::new();
        let mut current = FilterState::default();
        current.apply(FilterEdit::Category(Some("c1".into())));

        let outcome = reconciler.reconcile(&current, &Location::parse("/products"));
        assert_eq!(outcome.filters, None);
    }
}
