//! In-memory market data repository keyed by ticker.
//!
//! Tickers are case-insensitive: data is stored and looked up upper-cased.
//! The trait exists so the simulation layer can run against any store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::DailyBar;

/// Read/write access to per-ticker bar history.
pub trait BarRepository: Send + Sync {
    /// All bars for the ticker, sorted by date ascending. `None` for
    /// unknown or blank tickers and for tickers with no data.
    fn find(&self, ticker: &str) -> Option<Vec<DailyBar>>;

    /// Store bars for a ticker, replacing any existing data.
    fn save(&self, ticker: &str, bars: Vec<DailyBar>);

    fn contains(&self, ticker: &str) -> bool;
}

/// Map-backed repository, thread-safe for concurrent reads and writes.
#[derive(Debug, Default)]
pub struct InMemoryBarRepository {
    store: RwLock<HashMap<String, Vec<DailyBar>>>,
}

impl InMemoryBarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BarRepository for InMemoryBarRepository {
    fn find(&self, ticker: &str) -> Option<Vec<DailyBar>> {
        let key = ticker.trim();
        if key.is_empty() {
            return None;
        }
        let store = self.store.read().unwrap();
        let bars = store.get(&key.to_uppercase())?;
        if bars.is_empty() {
            return None;
        }
        let mut sorted = bars.clone();
        sorted.sort_by_key(|bar| bar.date);
        Some(sorted)
    }

    fn save(&self, ticker: &str, bars: Vec<DailyBar>) {
        let key = ticker.trim();
        assert!(!key.is_empty(), "ticker must not be blank");
        self.store
            .write()
            .unwrap()
            .insert(key.to_uppercase(), bars);
    }

    fn contains(&self, ticker: &str) -> bool {
        let key = ticker.trim();
        if key.is_empty() {
            return false;
        }
        self.store
            .read()
            .unwrap()
            .get(&key.to_uppercase())
            .is_some_and(|bars| !bars.is_empty())
    }
}
