//! Simulation report — the statistics block a run produces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete result of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub ticker: String,
    pub strategy: String,
    /// First/last bar dates; absent when the run saw no data.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub bar_count: usize,
    pub trade_count: usize,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_pnl: f64,
    pub sharpe: f64,
    /// Positive fraction: 0.15 means a 15% peak-to-trough drop.
    pub max_drawdown: f64,
}

impl SimReport {
    /// Zeroed report for a run with no data: capital untouched, no trades.
    pub fn flat(ticker: &str, strategy: &str, initial_capital: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            strategy: strategy.to_string(),
            start_date: None,
            end_date: None,
            bar_count: 0,
            trade_count: 0,
            initial_capital,
            final_capital: initial_capital,
            total_pnl: 0.0,
            sharpe: 0.0,
            max_drawdown: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_report_preserves_capital() {
        let report = SimReport::flat("SPY", "ma_crossover", 100_000.0);
        assert_eq!(report.final_capital, 100_000.0);
        assert_eq!(report.total_pnl, 0.0);
        assert_eq!(report.bar_count, 0);
        assert!(report.start_date.is_none());
    }

    #[test]
    fn report_roundtrips_through_json() {
        let report = SimReport::flat("SPY", "ma_crossover", 100_000.0);
        let json = serde_json::to_string(&report).unwrap();
        let back: SimReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ticker, "SPY");
        assert_eq!(back.initial_capital, 100_000.0);
    }
}
