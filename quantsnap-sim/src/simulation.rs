//! All-in long-only portfolio walk.
//!
//! Buy converts all cash to shares at the bar close; Sell liquidates at the
//! bar close; Hold does nothing. Signals arrive one per bar from the
//! strategy, and the equity curve starts at the initial capital.

use quantsnap_core::domain::{DailyBar, TradeSignal};
use quantsnap_core::repository::BarRepository;
use quantsnap_core::strategy::{build_strategy, StrategyError, TradingStrategy};
use thiserror::Error;

use crate::config::SimConfig;
use crate::metrics;
use crate::report::SimReport;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no market data for ticker '{0}'")]
    TickerNotFound(String),

    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Run a strategy over bars already in hand.
///
/// Empty input yields a flat report (capital untouched), matching the
/// contract that a data-less run is not an error at this layer.
pub fn run_simulation(
    strategy: &dyn TradingStrategy,
    bars: &[DailyBar],
    ticker: &str,
    initial_capital: f64,
) -> SimReport {
    if bars.is_empty() {
        return SimReport::flat(ticker, strategy.name(), initial_capital);
    }

    let signals = strategy.generate_signals(bars);

    let mut cash = initial_capital;
    let mut shares = 0.0_f64;
    let mut trade_count = 0usize;
    let mut equity = Vec::with_capacity(bars.len() + 1);
    equity.push(initial_capital);

    for (bar, signal) in bars.iter().zip(&signals) {
        match signal {
            TradeSignal::Buy => {
                if shares == 0.0 && cash > 0.0 {
                    shares = cash / bar.close;
                    cash = 0.0;
                    trade_count += 1;
                }
            }
            TradeSignal::Sell => {
                if shares > 0.0 {
                    cash = shares * bar.close;
                    shares = 0.0;
                    trade_count += 1;
                }
            }
            TradeSignal::Hold => {}
        }

        equity.push(cash + shares * bar.close);
    }

    // Open position is marked to the last close by the final equity entry.
    let final_capital = *equity.last().unwrap();

    SimReport {
        ticker: ticker.to_string(),
        strategy: strategy.name().to_string(),
        start_date: bars.first().map(|b| b.date),
        end_date: bars.last().map(|b| b.date),
        bar_count: bars.len(),
        trade_count,
        initial_capital,
        final_capital,
        total_pnl: final_capital - initial_capital,
        sharpe: metrics::sharpe_ratio(&equity),
        max_drawdown: metrics::max_drawdown(&equity),
    }
}

/// Run a strategy for a ticker held in the repository.
pub fn simulate_ticker(
    repository: &dyn BarRepository,
    ticker: &str,
    strategy: &dyn TradingStrategy,
    initial_capital: f64,
) -> Result<SimReport, SimError> {
    let bars = repository
        .find(ticker)
        .ok_or_else(|| SimError::TickerNotFound(ticker.to_string()))?;
    Ok(run_simulation(strategy, &bars, ticker, initial_capital))
}

/// Run the configured simulation against a repository.
///
/// High-level entry point used by the CLI: resolves the strategy from the
/// config's type name and parameters, then replays the configured ticker.
pub fn run_from_config(
    config: &SimConfig,
    repository: &dyn BarRepository,
) -> Result<SimReport, SimError> {
    let strategy = build_strategy(&config.strategy.strategy_type, &config.strategy.params)?;
    simulate_ticker(
        repository,
        &config.backtest.ticker,
        strategy.as_ref(),
        config.backtest.initial_capital,
    )
}
