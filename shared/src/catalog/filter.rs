//! Filter state of the product listing

use serde::{Deserialize, Serialize};

use super::PriceRange;

/// Page size used when nothing else is requested
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Page sizes offered by the "items per page" control
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [12, 24, 48];

/// Canonical product query
///
/// `page` is 1-based. Every edit except page navigation resets it to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: Option<PriceRange>,
    pub page: u32,
    pub limit: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            brand: None,
            price_range: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A direct change made through the filter controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Search(String),
    Category(Option<String>),
    Brand(Option<String>),
    PriceRange(Option<PriceRange>),
    Limit(u32),
}

/// Normalize an opaque identifier coming from a control or a URL.
///
/// Surrounding whitespace is trimmed. Empty, whitespace-only or
/// control-character values count as absent.
pub fn sanitize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }
    Some(trimmed.to_string())
}

impl FilterState {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: normalize_limit(limit),
            ..Self::default()
        }
    }

    /// Apply a control edit and go back to the first page
    pub fn apply(&mut self, edit: FilterEdit) {
        match edit {
            FilterEdit::Search(search) => self.search = search,
            FilterEdit::Category(id) => self.category = id.as_deref().and_then(sanitize_id),
            FilterEdit::Brand(id) => self.brand = id.as_deref().and_then(sanitize_id),
            FilterEdit::PriceRange(range) => self.price_range = range,
            FilterEdit::Limit(limit) => self.limit = normalize_limit(limit),
        }
        self.page = 1;
    }

    /// Change only the page
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Reset every field to its default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any narrowing filter (not paging) is set
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_some()
            || self.brand.is_some()
            || self.price_range.is_some()
    }
}

fn normalize_limit(limit: u32) -> u32 {
    if limit == 0 { DEFAULT_PAGE_SIZE } else { limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u32) -> FilterState {
        let mut filters = FilterState::default();
        filters.go_to_page(page);
        filters
    }

    #[test]
    fn test_every_edit_resets_page() {
        let edits = vec![
            FilterEdit::Search("phone".into()),
            FilterEdit::Category(Some("c1".into())),
            FilterEdit::Brand(Some("b1".into())),
            FilterEdit::PriceRange(Some(PriceRange::PRESETS[1])),
            FilterEdit::Limit(24),
            FilterEdit::Category(None),
        ];
        for edit in edits {
            let mut filters = on_page(4);
            filters.apply(edit.clone());
            assert_eq!(filters.page, 1, "{edit:?} kept the page");
        }
    }

    #[test]
    fn test_page_change_keeps_other_fields() {
        let mut filters = FilterState::default();
        filters.apply(FilterEdit::Search("lamp".into()));
        filters.apply(FilterEdit::Brand(Some("b2".into())));
        let before = filters.clone();

        filters.go_to_page(5);
        assert_eq!(filters.page, 5);
        assert_eq!(filters.search, before.search);
        assert_eq!(filters.brand, before.brand);
        assert_eq!(filters.limit, before.limit);
    }

    #[test]
    fn test_blank_ids_are_absent() {
        let mut filters = FilterState::default();
        filters.apply(FilterEdit::Category(Some("   ".into())));
        assert_eq!(filters.category, None);
        assert_eq!(sanitize_id(" c9 "), Some("c9".to_string()));
        assert_eq!(sanitize_id("\t \n"), None);
        assert_eq!(sanitize_id("c\u{0}9"), None);
        assert_eq!(sanitize_id("c\u{7}"), None);
    }

    #[test]
    fn test_ids_with_inner_spaces_are_kept() {
        let mut filters = FilterState::default();
        filters.apply(FilterEdit::Category(Some(" c 9 ".into())));
        assert_eq!(filters.category.as_deref(), Some("c 9"));
        assert_eq!(sanitize_id("Home Audio"), Some("Home Audio".to_string()));
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut filters = FilterState::with_limit(48);
        filters.apply(FilterEdit::Search("x".into()));
        filters.apply(FilterEdit::PriceRange(Some(PriceRange::Above { min: 5000 })));
        filters.go_to_page(3);
        assert!(filters.has_active_filters());

        filters.clear();
        assert_eq!(filters, FilterState::default());
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_zero_limit_falls_back_to_default() {
        let mut filters = FilterState::default();
        filters.apply(FilterEdit::Limit(0));
        assert_eq!(filters.limit, DEFAULT_PAGE_SIZE);
    }
}
