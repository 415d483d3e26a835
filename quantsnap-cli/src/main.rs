//! QuantSnap CLI — snapshot export and backtest commands.
//!
//! Commands:
//! - `export` — fetch daily OHLCV history from Yahoo Finance and write a CSV snapshot
//! - `backtest` — replay a snapshot CSV through a strategy simulation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use quantsnap_core::data::{
    export_snapshot, load_snapshot_csv, CircuitBreaker, StdoutProgress, YahooProvider,
};
use quantsnap_core::repository::{BarRepository, InMemoryBarRepository};
use quantsnap_sim::{run_from_config, SimConfig, SimReport};

#[derive(Parser)]
#[command(
    name = "quantsnap",
    about = "QuantSnap — daily market snapshots and strategy backtests"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily OHLCV history from Yahoo Finance and write a CSV snapshot.
    Export {
        /// Ticker symbol to fetch.
        #[arg(long, default_value = "SPY")]
        symbol: String,

        /// Start date (YYYY-MM-DD), inclusive.
        #[arg(long, default_value = "2020-01-01")]
        start: String,

        /// End date (YYYY-MM-DD), exclusive. A future date means
        /// "through the latest available session".
        #[arg(long, default_value = "2026-01-01")]
        end: String,

        /// Output CSV path. Overwrites any existing file.
        #[arg(long, default_value = "historical_data.csv")]
        out: PathBuf,
    },
    /// Replay a snapshot CSV through a strategy simulation.
    Backtest {
        /// Path to a TOML config file. Flags below override its fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Snapshot CSV produced by `export`.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Ticker label for the loaded data.
        #[arg(long)]
        ticker: Option<String>,

        /// Short moving-average window (bars).
        #[arg(long)]
        short_window: Option<usize>,

        /// Long moving-average window (bars).
        #[arg(long)]
        long_window: Option<usize>,

        /// Starting capital.
        #[arg(long)]
        capital: Option<f64>,

        /// Write the full report as JSON to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            symbol,
            start,
            end,
            out,
        } => run_export(&symbol, &start, &end, &out),
        Commands::Backtest {
            config,
            data,
            ticker,
            short_window,
            long_window,
            capital,
            report,
        } => run_backtest(
            config,
            data,
            ticker,
            short_window,
            long_window,
            capital,
            report,
        ),
    }
}

fn run_export(symbol: &str, start: &str, end: &str, out: &Path) -> Result<()> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").context("invalid --start date")?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").context("invalid --end date")?;

    let breaker = Arc::new(CircuitBreaker::default_policy());
    let provider = YahooProvider::new(breaker);
    let progress = StdoutProgress;

    let summary = export_snapshot(&provider, symbol, start, end, out, &progress)?;
    println!(
        "Wrote {} rows ({} to {}) to {}",
        summary.rows,
        summary.first,
        summary.last,
        summary.path.display()
    );

    Ok(())
}

fn run_backtest(
    config_path: Option<PathBuf>,
    data: Option<PathBuf>,
    ticker: Option<String>,
    short_window: Option<usize>,
    long_window: Option<usize>,
    capital: Option<f64>,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SimConfig::from_file(&path)?,
        None => default_config(),
    };

    if let Some(data) = data {
        config.backtest.data_file = data.display().to_string();
    }
    if let Some(ticker) = ticker {
        config.backtest.ticker = ticker;
    }
    if let Some(capital) = capital {
        config.backtest.initial_capital = capital;
    }
    if let Some(short) = short_window {
        config
            .strategy
            .params
            .insert("short_window".into(), short as f64);
    }
    if let Some(long) = long_window {
        config
            .strategy
            .params
            .insert("long_window".into(), long as f64);
    }

    let loaded = load_snapshot_csv(Path::new(&config.backtest.data_file))?;
    if loaded.skipped > 0 {
        eprintln!(
            "WARNING: skipped {} malformed row(s) in {}",
            loaded.skipped, config.backtest.data_file
        );
    }

    let repository = InMemoryBarRepository::new();
    repository.save(&config.backtest.ticker, loaded.bars);

    let report = run_from_config(&config, &repository)?;
    print_report(&report);

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn default_config() -> SimConfig {
    let mut params = std::collections::BTreeMap::new();
    params.insert("short_window".to_string(), 20.0);
    params.insert("long_window".to_string(), 50.0);

    SimConfig {
        backtest: quantsnap_sim::config::BacktestSection {
            ticker: "SPY".to_string(),
            data_file: "historical_data.csv".to_string(),
            initial_capital: 100_000.0,
        },
        strategy: quantsnap_sim::config::StrategySection {
            strategy_type: "ma_crossover".to_string(),
            params,
        },
    }
}

fn print_report(report: &SimReport) {
    println!();
    println!("=== Backtest Result ===");
    println!("Ticker:          {}", report.ticker);
    println!("Strategy:        {}", report.strategy);
    match (report.start_date, report.end_date) {
        (Some(start), Some(end)) => println!("Period:          {start} to {end}"),
        _ => println!("Period:          (no data)"),
    }
    println!("Bars:            {}", report.bar_count);
    println!("Trades:          {}", report.trade_count);
    println!();
    println!("--- Performance ---");
    println!("Initial Capital: {:.2}", report.initial_capital);
    println!("Final Capital:   {:.2}", report.final_capital);
    println!("Total PnL:       {:.2}", report.total_pnl);
    println!("Sharpe:          {:.3}", report.sharpe);
    println!("Max Drawdown:    {:.2}%", report.max_drawdown * 100.0);
    println!();
}
