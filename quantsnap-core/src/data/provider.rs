//! Data provider trait and structured error types.
//!
//! `MarketDataProvider` abstracts over the upstream source (Yahoo Finance in
//! production, fixtures in tests) so the export pipeline can be exercised
//! without network access.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::DailyBar;

/// Errors from the data layer.
///
/// Every variant is fatal for the run that hits it: the exporter makes no
/// recovery attempt beyond the provider's own bounded retries.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider response format changed: {0}")]
    FormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no bars returned for '{symbol}' in the requested range")]
    EmptyRange { symbol: String },

    #[error("hard stop: provider requests are blocked (circuit breaker open)")]
    CircuitOpen,

    #[error("snapshot write failed: {0}")]
    SnapshotWrite(String),

    #[error("snapshot import failed: {0}")]
    Import(String),
}

/// Where a batch of bars came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    YahooFinance,
    Fixture,
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
    pub origin: FetchOrigin,
}

/// Trait for daily-bar data providers.
///
/// `start` is inclusive, `end` exclusive (the upstream convention: an end of
/// 2026-01-01 yields data through the last session of 2025).
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Whether the provider is currently willing to serve requests.
    fn is_available(&self) -> bool;
}
