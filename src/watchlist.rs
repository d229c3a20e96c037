//! Watchlist command dispatcher.
//!
//! Each operation validates its input, issues at most two sequential store
//! calls and returns a typed outcome. "Not found" and "already exists" are
//! outcomes, not errors.

use crate::exitcode;
use crate::store::{
    Direction, Filter, ItemPatch, NewItem, Query, StoreError, WatchlistItem, WatchlistStore,
};

/// Maximum title length, counted in characters after trimming.
pub const MAX_TITLE_LEN: usize = 250;

/// Input rejected before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title is too long ({len} characters, maximum is {max})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Id cannot be empty")]
    EmptyId,

    #[error("Invalid id '{0}': expected a number")]
    NonNumericId(String),
}

/// Errors a watchlist command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Remote store error: {0}")]
    Remote(#[from] StoreError),
}

impl WatchlistError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WatchlistError::Validation(_) => exitcode::USAGE,
            WatchlistError::Remote(e) => e.exit_code(),
        }
    }
}

/// Result of `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(WatchlistItem),
    /// An item with exactly this title was already stored; nothing written.
    AlreadyExists(WatchlistItem),
}

/// Result of `toggle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item with its flag as now stored.
    Toggled(WatchlistItem),
    NotFound(String),
}

/// Result of `remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The item as it was before deletion.
    Removed(WatchlistItem),
    NotFound(i64),
}

/// Check a title and return it trimmed.
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Err(ValidationError::EmptyTitle);
    }
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }

    Ok(trimmed)
}

/// Parse an id that must be numeric.
pub fn parse_numeric_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NonNumericId(raw.to_string()))
}

/// Wrap a search query as a substring pattern.
pub fn substring_pattern(query: &str) -> String {
    format!("%{}%", query)
}

/// Dispatches the five watchlist operations to a store.
pub struct Watchlist<S> {
    store: S,
}

impl<S: WatchlistStore> Watchlist<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a title unless an item with the exact same title exists.
    ///
    /// Titles are not unique in the table, so the existence check asks for
    /// one matching row instead of exactly one.
    pub async fn add(&self, title: &str) -> Result<AddOutcome, WatchlistError> {
        let title = validate_title(title)?;

        let existing = self
            .store
            .select(&Query::new().eq("title", title).limit(1))
            .await?
            .into_iter()
            .next();
        if let Some(item) = existing {
            log::debug!("'{}' already stored as id {}", title, item.id);
            return Ok(AddOutcome::AlreadyExists(item));
        }

        let item = self.store.insert(&NewItem::unwatched(title)).await?;
        log::info!("Added '{}' with id {}", item.title, item.id);
        Ok(AddOutcome::Added(item))
    }

    /// All items, most recently added first.
    pub async fn list(&self) -> Result<Vec<WatchlistItem>, WatchlistError> {
        let query = Query::new().order("created_at", Direction::Descending);
        Ok(self.store.select(&query).await?)
    }

    /// Flip the watched flag of the item with `id`.
    ///
    /// Read-then-write without a transaction: a concurrent toggle from
    /// another client can interleave (last writer wins).
    pub async fn toggle(&self, id: &str) -> Result<ToggleOutcome, WatchlistError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let Some(mut item) = self.store.maybe_single(&Query::new().eq("id", id)).await? else {
            return Ok(ToggleOutcome::NotFound(id.to_string()));
        };

        let patch = ItemPatch {
            watched: !item.watched,
        };
        self.store.update(&[Filter::eq("id", id)], &patch).await?;
        item.watched = patch.watched;

        log::info!("Set watched={} on id {}", item.watched, item.id);
        Ok(ToggleOutcome::Toggled(item))
    }

    /// Delete the item with numeric `id`.
    pub async fn remove(&self, id: &str) -> Result<RemoveOutcome, WatchlistError> {
        let id = parse_numeric_id(id)?;
        let filter = Filter::eq("id", id.to_string());

        let existing = self
            .store
            .maybe_single(&Query::new().eq("id", id.to_string()))
            .await?;
        let Some(item) = existing else {
            return Ok(RemoveOutcome::NotFound(id));
        };

        self.store.delete(&[filter]).await?;
        log::info!("Removed '{}' (id {})", item.title, item.id);
        Ok(RemoveOutcome::Removed(item))
    }

    /// Case-insensitive substring search on titles.
    ///
    /// Results come back in store order. Unbounded unless `limit` is set.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<WatchlistItem>, WatchlistError> {
        let mut q = Query::new().ilike("title", substring_pattern(query));
        if let Some(limit) = limit {
            q = q.limit(limit);
        }
        Ok(self.store.select(&q).await?)
    }
}
