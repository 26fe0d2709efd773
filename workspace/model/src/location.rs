use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A reporting jurisdiction (state, territory, or the national aggregate).
/// Corresponds to one row of the published location reference document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location key, e.g. "06" for California or "US" for national.
    pub code: String,
    /// Two-letter abbreviation, e.g. "CA".
    pub abbreviation: String,
    /// Human-readable display name.
    pub name: String,
    /// Census population used to convert counts to per-100k rates.
    pub population: u64,
}

/// Immutable reference data: every known location, keyed by code.
/// Loaded once per session and never mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct LocationRegistry {
    by_code: HashMap<String, Location>,
    /// Codes in document order, for stable listing output.
    order: Vec<String>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a location. A location with a duplicate code replaces the
    /// earlier entry without changing the listing order.
    pub fn insert(&mut self, location: Location) {
        if !self.by_code.contains_key(&location.code) {
            self.order.push(location.code.clone());
        }
        self.by_code.insert(location.code.clone(), location);
    }

    pub fn get(&self, code: &str) -> Option<&Location> {
        self.by_code.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// All locations in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.order.iter().filter_map(|code| self.by_code.get(code))
    }

    /// All location codes in document order.
    pub fn codes(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
