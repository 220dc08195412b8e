//! Page strip and page navigation derived from server pagination

use crate::response::Pagination;

/// Pages shown on each side of the current page
pub const PAGE_WINDOW: u32 = 2;

/// One entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, active: bool },
    Ellipsis,
}

/// Page navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
    Jump(u32),
}

impl Pagination {
    /// Whether the page controls are shown at all
    pub fn is_paginated(&self) -> bool {
        self.pages > 1
    }

    /// Page-number strip: first page, last page, `current ± PAGE_WINDOW`,
    /// with one ellipsis in place of each run of skipped pages.
    pub fn strip(&self) -> Vec<PageItem> {
        if self.pages == 0 {
            return Vec::new();
        }
        let current = self.current.clamp(1, self.pages);
        let low = current.saturating_sub(PAGE_WINDOW).max(1);
        let high = current.saturating_add(PAGE_WINDOW).min(self.pages);

        let mut numbers = Vec::with_capacity((high - low + 3) as usize);
        numbers.push(1);
        numbers.extend(low..=high);
        numbers.push(self.pages);
        numbers.dedup();

        let mut items = Vec::with_capacity(numbers.len() + 2);
        let mut previous: Option<u32> = None;
        for number in numbers {
            if let Some(prev) = previous
                && number - prev > 1
            {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number,
                active: number == current,
            });
            previous = Some(number);
        }
        items
    }

    /// Target page of `action`, or `None` when the control is disabled
    pub fn target(&self, action: PageAction) -> Option<u32> {
        let current = self.current;
        match action {
            PageAction::First if current > 1 => Some(1),
            PageAction::Prev if current > 1 => Some(current - 1),
            PageAction::Next if current < self.pages => Some(current + 1),
            PageAction::Last if current < self.pages => Some(self.pages),
            PageAction::Jump(page) if (1..=self.pages).contains(&page) && page != current => {
                Some(page)
            }
            _ => None,
        }
    }

    pub fn is_enabled(&self, action: PageAction) -> bool {
        self.target(action).is_some()
    }

    /// "Showing 12 of 84 products"
    pub fn summary(&self, shown: usize) -> String {
        format!("Showing {} of {} products", shown, self.total)
    }
}
