//! Routing layer seam
//!
//! A [`Location`] is what the router reports for the current history entry:
//! the path, the query string and an optional one-shot [`StampedIntent`].
//! Intents are applied exactly once: the consumer acknowledges the
//! generation it applied and the router clears it from history.

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Url;

/// Path of the product listing route
pub const LISTING_PATH: &str = "/products";

// Only used to resolve relative hrefs; never requested.
const BASE: &str = "http://catalog.local/";

/// Filter carried by a navigation intent, with its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFilter {
    pub id: String,
    pub name: String,
}

impl NamedFilter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// "Apply this filter" instruction attached to a route transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterIntent {
    pub category: Option<NamedFilter>,
    pub brand: Option<NamedFilter>,
}

impl FilterIntent {
    pub fn category(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Some(NamedFilter::new(id, name)),
            brand: None,
        }
    }

    pub fn brand(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: None,
            brand: Some(NamedFilter::new(id, name)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.brand.is_none()
    }
}

/// Intent plus the generation the router assigned to it.
///
/// Generations increase monotonically within one router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedIntent {
    pub generation: u64,
    pub intent: FilterIntent,
}

/// Current history entry as seen by the catalog view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub intent: Option<StampedIntent>,
}

impl Location {
    /// Parse a relative href such as `/products?brand=b1`
    pub fn parse(href: &str) -> Self {
        let Ok(url) = Url::parse(BASE).and_then(|base| base.join(href)) else {
            return Self {
                path: href.to_string(),
                ..Self::default()
            };
        };
        Self {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            intent: None,
        }
    }

    /// First value of a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path plus encoded query string
    pub fn href(&self) -> String {
        build_href(&self.path, self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Join a path and query pairs into a relative href
pub fn build_href<'a>(path: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut pairs = pairs.into_iter().peekable();
    if pairs.peek().is_none() {
        return path.to_string();
    }
    let Ok(mut url) = Url::parse(BASE) else {
        return path.to_string();
    };
    url.query_pairs_mut().extend_pairs(pairs);
    match url.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}

/// Routing layer used by the catalog view
pub trait Navigator: Send {
    /// Current history entry
    fn location(&self) -> Location;

    /// Rewrite the current entry without a reload. Drops any pending intent.
    fn replace(&mut self, href: &str);

    /// Clear the intent with `generation` from the current entry
    fn acknowledge(&mut self, generation: u64);

    /// Rewrite the current entry only while it still equals `expected`.
    ///
    /// Returns `false` when the history moved since `expected` was read.
    fn replace_if(&mut self, expected: &Location, href: &str) -> bool {
        if self.location() != *expected {
            return false;
        }
        self.replace(href);
        true
    }
}

impl<N: Navigator> Navigator for Arc<Mutex<N>> {
    fn location(&self) -> Location {
        self.lock().location()
    }

    fn replace(&mut self, href: &str) {
        self.lock().replace(href)
    }

    fn acknowledge(&mut self, generation: u64) {
        self.lock().acknowledge(generation)
    }

    // One lock for the check and the write
    fn replace_if(&mut self, expected: &Location, href: &str) -> bool {
        self.lock().replace_if(expected, href)
    }
}

/// In-process browser-like history
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    next_generation: u64,
}

impl MemoryHistory {
    pub fn new(href: &str) -> Self {
        Self {
            entries: vec![Location::parse(href)],
            index: 0,
            next_generation: 1,
        }
    }

    /// Wrap in a handle that can be shared with a running controller
    pub fn shared(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }

    /// Navigate to `href`, discarding forward entries
    pub fn push(&mut self, href: &str) {
        self.push_location(Location::parse(href));
    }

    /// Navigate to `href` carrying a one-shot intent; returns its generation
    pub fn push_with_intent(&mut self, href: &str, intent: FilterIntent) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        let mut location = Location::parse(href);
        location.intent = Some(StampedIntent { generation, intent });
        self.push_location(location);
        generation
    }

    fn push_location(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        self.entries[self.index].clone()
    }

    fn replace(&mut self, href: &str) {
        self.entries[self.index] = Location::parse(href);
    }

    fn acknowledge(&mut self, generation: u64) {
        let entry = &mut self.entries[self.index];
        if entry
            .intent
            .as_ref()
            .is_some_and(|stamped| stamped.generation == generation)
        {
            entry.intent = None;
        }
    }
}
