//! Trading strategies — signal generation over daily bars.
//!
//! Strategies are built by name from a flat parameter map so they can be
//! driven from config files without the caller knowing concrete types.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{DailyBar, TradeSignal};

pub mod ma_crossover;

pub use ma_crossover::MaCrossoverStrategy;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("unknown strategy type: {0}")]
    UnknownStrategy(String),

    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// A signal generator over daily bars.
pub trait TradingStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// One signal per input bar, chronological order.
    fn generate_signals(&self, bars: &[DailyBar]) -> Vec<TradeSignal>;
}

/// Build a strategy from a type name and a parameter map.
pub fn build_strategy(
    kind: &str,
    params: &BTreeMap<String, f64>,
) -> Result<Box<dyn TradingStrategy>, StrategyError> {
    match kind {
        "ma_crossover" => {
            let short = require_window(params, "short_window")?;
            let long = require_window(params, "long_window")?;
            Ok(Box::new(MaCrossoverStrategy::new(short, long)?))
        }
        other => Err(StrategyError::UnknownStrategy(other.to_string())),
    }
}

fn require_window(
    params: &BTreeMap<String, f64>,
    key: &'static str,
) -> Result<usize, StrategyError> {
    let value = *params.get(key).ok_or(StrategyError::MissingParam(key))?;
    if !value.is_finite() || value < 0.0 {
        return Err(StrategyError::InvalidParams(format!(
            "{key} must be a non-negative number, got {value}"
        )));
    }
    Ok(value as usize)
}
