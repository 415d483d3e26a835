//! Market data acquisition and snapshot persistence.

pub mod circuit_breaker;
pub mod csv_import;
pub mod provider;
pub mod snapshot;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_import::{load_snapshot_csv, ImportSummary};
pub use provider::{DataError, FetchOrigin, FetchResult, MarketDataProvider};
pub use snapshot::{
    export_snapshot, write_snapshot, ExportProgress, SilentProgress, SnapshotSummary,
    StdoutProgress,
};
pub use yahoo::YahooProvider;
