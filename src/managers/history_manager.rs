//! History Manager for PantryChef.
//!
//! Implements `HistoryManagerTrait`: loading, appending, finding and clearing
//! the rolling list of past pantry queries, stored as one JSON document under
//! [`HISTORY_KEY`] in a [`KeyValueStore`].

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::database::KeyValueStore;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;
use crate::types::recipe::RecipeRecord;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "sr_recipe_history_v1";

/// Maximum number of retained history entries.
pub const MAX_HISTORY: usize = 12;

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    /// Entries newest first. Never fails: unreadable or malformed storage reads as empty.
    fn load(&self) -> Vec<HistoryEntry>;
    fn append(
        &mut self,
        query: &str,
        diet: Option<&str>,
        results: Vec<RecipeRecord>,
    ) -> Result<HistoryEntry, HistoryError>;
    fn find(&self, id: i64) -> Result<HistoryEntry, HistoryError>;
    fn clear(&mut self) -> Result<(), HistoryError>;
}

/// History manager over a borrowed key-value store.
pub struct HistoryManager<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> HistoryManager<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

impl<'a, S: KeyValueStore + ?Sized> HistoryManagerTrait for HistoryManager<'a, S> {
    fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                debug!("history read failed, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(MAX_HISTORY);
                entries
            }
            Err(e) => {
                debug!("stored history is malformed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepends a new entry and writes the list back, evicting past [`MAX_HISTORY`].
    ///
    /// The id is the creation time in milliseconds, bumped past the newest
    /// stored id when the clock has not moved on, so ids stay unique.
    fn append(
        &mut self,
        query: &str,
        diet: Option<&str>,
        results: Vec<RecipeRecord>,
    ) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.load();

        let mut id = Self::now_millis();
        if let Some(newest) = entries.first() {
            if id <= newest.id {
                id = newest.id + 1;
            }
        }

        let entry = HistoryEntry {
            id,
            query: query.to_string(),
            diet: diet.map(|d| d.to_string()),
            results,
        };
        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY);

        let json = serde_json::to_string(&entries)
            .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
        self.store.set(HISTORY_KEY, &json)?;
        Ok(entry)
    }

    fn find(&self, id: i64) -> Result<HistoryEntry, HistoryError> {
        self.load()
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or(HistoryError::NotFound(id))
    }

    /// Removes the stored list entirely.
    fn clear(&mut self) -> Result<(), HistoryError> {
        self.store.remove(HISTORY_KEY)?;
        Ok(())
    }
}
