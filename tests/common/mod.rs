//! In-memory `WatchlistStore` used by the dispatcher tests.
//!
//! Evaluates `Query` filters the way the remote store does (exact equality,
//! case-insensitive LIKE with `%`/`_` wildcards, ordering, limit) and counts
//! every call so tests can assert which requests were issued.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use watchlist::store::{
    Direction, Filter, ItemId, ItemPatch, NewItem, Query, StoreError, WatchlistItem,
    WatchlistStore,
};

/// Number of calls per store operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub select: usize,
    pub maybe_single: usize,
    pub insert: usize,
    pub update: usize,
    pub delete: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.select + self.maybe_single + self.insert + self.update + self.delete
    }
}

#[derive(Default)]
struct State {
    rows: Vec<WatchlistItem>,
    next_id: i64,
    calls: Calls,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `titles`, inserted in order (last is newest).
    pub fn with_titles(titles: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            for title in titles {
                push_row(&mut state, title, false);
            }
        }
        store
    }

    /// Make every following call fail with a 503 API error.
    pub fn fail_requests(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn rows(&self) -> Vec<WatchlistItem> {
        self.state.lock().unwrap().rows.clone()
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn push_row(state: &mut State, title: &str, watched: bool) -> WatchlistItem {
    state.next_id += 1;
    let item = WatchlistItem {
        id: ItemId::Numeric(state.next_id),
        title: title.to_string(),
        watched,
        // zero-padded so string order matches insertion order
        created_at: Some(format!("{:020}", state.next_id)),
    };
    state.rows.push(item.clone());
    item
}

fn column_value(item: &WatchlistItem, column: &str) -> String {
    match column {
        "id" => item.id.to_string(),
        "title" => item.title.clone(),
        "watched" => item.watched.to_string(),
        "created_at" => item.created_at.clone().unwrap_or_default(),
        other => panic!("unknown column {}", other),
    }
}

/// SQL LIKE matching, case-insensitive.
pub fn ilike(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();
    like_at(&pattern, &text)
}

fn like_at(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|i| like_at(rest, &text[i..])),
        Some(('_', rest)) => !text.is_empty() && like_at(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && like_at(rest, &text[1..]),
    }
}

fn matches(item: &WatchlistItem, filters: &[Filter]) -> bool {
    filters.iter().all(|f| match f {
        Filter::Eq { column, value } => column_value(item, column) == *value,
        Filter::ILike { column, pattern } => ilike(pattern, &column_value(item, column)),
    })
}

fn run_query(rows: &[WatchlistItem], query: &Query) -> Vec<WatchlistItem> {
    let mut found: Vec<WatchlistItem> = rows
        .iter()
        .filter(|item| matches(item, query.filters()))
        .cloned()
        .collect();

    if let Some(order) = query.get_order() {
        found.sort_by_key(|item| column_value(item, &order.column));
        if order.direction == Direction::Descending {
            found.reverse();
        }
    }
    if let Some(limit) = query.get_limit() {
        found.truncate(limit);
    }
    found
}

#[async_trait]
impl WatchlistStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<WatchlistItem>, StoreError> {
        self.state.lock().unwrap().calls.select += 1;
        self.check_failing()?;
        let state = self.state.lock().unwrap();
        Ok(run_query(&state.rows, query))
    }

    async fn maybe_single(&self, query: &Query) -> Result<Option<WatchlistItem>, StoreError> {
        self.state.lock().unwrap().calls.maybe_single += 1;
        self.check_failing()?;
        let state = self.state.lock().unwrap();
        let mut found = run_query(&state.rows, query);
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            n => Err(StoreError::MultipleRows(n)),
        }
    }

    async fn insert(&self, item: &NewItem) -> Result<WatchlistItem, StoreError> {
        self.state.lock().unwrap().calls.insert += 1;
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        Ok(push_row(&mut state, &item.title, item.watched))
    }

    async fn update(&self, filters: &[Filter], patch: &ItemPatch) -> Result<(), StoreError> {
        self.state.lock().unwrap().calls.update += 1;
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        for row in state.rows.iter_mut().filter(|r| matches(r, filters)) {
            row.watched = patch.watched;
        }
        Ok(())
    }

    async fn delete(&self, filters: &[Filter]) -> Result<(), StoreError> {
        self.state.lock().unwrap().calls.delete += 1;
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        state.rows.retain(|r| !matches(r, filters));
        Ok(())
    }
}
