//! Most-recently-used list of successfully looked-up city names.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::StorageError, storage::KeyValueStore};

pub const HISTORY_KEY: &str = "history.json";
pub const MAX_HISTORY: usize = 10;

/// City names, most recent first. Unique case-insensitively, at most
/// [`MAX_HISTORY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList(Vec<String>);

impl HistoryList {
    /// Builds a list from arbitrary entries, keeping the first occurrence of
    /// each name and dropping anything past the limit.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if !list.iter().any(|c| same_city(c, &entry)) {
                list.push(entry);
            }
        }
        list.truncate(MAX_HISTORY);
        Self(list)
    }

    /// Insert-or-promote to the front, evicting the oldest past the limit.
    pub fn promote(&mut self, city: &str) {
        self.0.retain(|c| !same_city(c, city));
        self.0.insert(0, city.to_string());
        self.0.truncate(MAX_HISTORY);
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn same_city(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Loads and records history through a [`KeyValueStore`]. Storage failures
/// are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persisted history, or an empty list if absent or unreadable.
    pub fn load(&self) -> HistoryList {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistoryList::default(),
            Err(err) => {
                warn!(error = %err, "failed to read search history");
                return HistoryList::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => HistoryList::from_entries(entries),
            Err(err) => {
                warn!(error = %err, "stored search history is malformed, starting empty");
                HistoryList::default()
            }
        }
    }

    pub fn record_success(&self, city: &str) -> HistoryList {
        let mut history = self.load();
        history.promote(city);
        self.persist(&history);
        info!(city, entries = history.len(), "recorded search history");
        history
    }

    pub fn clear(&self) -> HistoryList {
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            warn!(error = %err, "failed to clear search history");
        }
        HistoryList::default()
    }

    fn persist(&self, history: &HistoryList) {
        let result = serde_json::to_string(history)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(HISTORY_KEY, &json));

        if let Err(err) = result {
            warn!(error = %err, "failed to persist search history");
        }
    }
}
