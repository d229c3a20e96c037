//! `WatchlistStore` backed by a Supabase (PostgREST) table.

use async_trait::async_trait;

use super::client::{RestClient, StoreError};
use super::query::{Filter, Query};
use super::{ItemPatch, NewItem, WatchlistItem, WatchlistStore};
use crate::config::Config;

/// Table used when the config does not name one.
pub const DEFAULT_TABLE: &str = "watchlist";

/// Columns fetched for every item.
pub const ITEM_COLUMNS: &str = "id,title,watched,created_at";

pub struct SupabaseStore {
    client: RestClient,
    table: String,
}

impl SupabaseStore {
    /// Build a store from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let client = RestClient::new(&config.supabase_url, &config.supabase_key)?;
        Ok(Self::new(client, config.table.clone()))
    }

    pub fn new(client: RestClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

#[async_trait]
impl WatchlistStore for SupabaseStore {
    async fn select(&self, query: &Query) -> Result<Vec<WatchlistItem>, StoreError> {
        let query = query.clone().with_default_columns(ITEM_COLUMNS);
        self.client.select(&self.table, &query).await
    }

    async fn maybe_single(&self, query: &Query) -> Result<Option<WatchlistItem>, StoreError> {
        let query = query.clone().with_default_columns(ITEM_COLUMNS);
        self.client.maybe_single(&self.table, &query).await
    }

    async fn insert(&self, item: &NewItem) -> Result<WatchlistItem, StoreError> {
        self.client.insert(&self.table, item).await
    }

    async fn update(&self, filters: &[Filter], patch: &ItemPatch) -> Result<(), StoreError> {
        self.client.update(&self.table, filters, patch).await
    }

    async fn delete(&self, filters: &[Filter]) -> Result<(), StoreError> {
        self.client.delete(&self.table, filters).await
    }
}
