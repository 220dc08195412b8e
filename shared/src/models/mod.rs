//! Data models
//!
//! Shared between the catalog API (wire format) and the client.
//! IDs are opaque document ids serialized as `_id`.

pub mod brand;
pub mod category;
pub mod product;

// Re-exports
pub use brand::*;
pub use category::*;
pub use product::*;

use serde::{Deserialize, Serialize};

/// Entity that can back a filter dropdown (id + display name)
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Look up the display name of `id` in a lookup list
pub fn resolve_name<'a, T: Named>(items: &'a [T], id: &str) -> Option<&'a str> {
    items.iter().find(|item| item.id() == id).map(Named::name)
}

/// Reference to another document: either a bare id or a populated `{_id, name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: String,
    },
    Id(String),
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated { id, .. } | Self::Id(id) => id,
        }
    }

    /// Display name, only known when the reference was populated
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Populated { name, .. } if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}
