//! Remote watchlist storage.
//!
//! The dispatcher only talks to a `WatchlistStore`. `SupabaseStore` is the
//! production implementation, backed by `RestClient`; tests plug in their
//! own in-memory store.

mod client;
mod query;
mod supabase;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::{RestClient, StoreError};
pub use query::{Direction, Filter, Order, Query};
pub use supabase::{SupabaseStore, DEFAULT_TABLE, ITEM_COLUMNS};

/// Identifier assigned by the store. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Numeric(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One row of the watchlist table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub watched: bool,
    /// Creation timestamp as returned by the store. Only used for ordering.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Row sent on insert. The store fills in `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub title: String,
    pub watched: bool,
}

impl NewItem {
    /// A new, unwatched item.
    pub fn unwatched(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            watched: false,
        }
    }
}

/// Partial update body. Only the watched flag is ever changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemPatch {
    pub watched: bool,
}

/// Generic table operations the dispatcher needs from a store.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// All rows matching `query`.
    async fn select(&self, query: &Query) -> Result<Vec<WatchlistItem>, StoreError>;

    /// Zero or one row matching `query`; more than one is an error.
    async fn maybe_single(&self, query: &Query) -> Result<Option<WatchlistItem>, StoreError>;

    /// Insert a row and return it as stored.
    async fn insert(&self, item: &NewItem) -> Result<WatchlistItem, StoreError>;

    /// Apply `patch` to all rows matching `filters`.
    async fn update(&self, filters: &[Filter], patch: &ItemPatch) -> Result<(), StoreError>;

    /// Delete all rows matching `filters`.
    async fn delete(&self, filters: &[Filter]) -> Result<(), StoreError>;
}
