//! QuantSnap simulation — replays trading strategies over historical bars
//! and reports portfolio statistics.
//!
//! Built on `quantsnap-core`:
//! - TOML-backed run configuration
//! - All-in long-only portfolio walk
//! - Performance metrics (PnL, Sharpe, max drawdown)

pub mod config;
pub mod metrics;
pub mod report;
pub mod simulation;

pub use config::{ConfigError, SimConfig};
pub use report::SimReport;
pub use simulation::{run_from_config, run_simulation, simulate_ticker, SimError};
