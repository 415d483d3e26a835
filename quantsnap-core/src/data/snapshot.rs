//! Daily snapshot export — the fetch → normalize → persist pipeline.
//!
//! Output format: `Date,Open,High,Low,Close,Volume`, one row per trading
//! day, ISO dates, UTF-8. The file is written atomically (temp file +
//! rename) so a failed run never leaves a partial snapshot behind, and an
//! existing snapshot at the same path is overwritten without warning.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::provider::{DataError, FetchOrigin, MarketDataProvider};
use crate::domain::DailyBar;

/// Row shape of the snapshot CSV. Field order is the column order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SnapshotRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<&DailyBar> for SnapshotRow {
    fn from(bar: &DailyBar) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl From<SnapshotRow> for DailyBar {
    fn from(row: SnapshotRow) -> Self {
        DailyBar::new(row.date, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Summary of a completed export.
#[derive(Debug, Clone)]
pub struct SnapshotSummary {
    pub symbol: String,
    pub rows: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub origin: FetchOrigin,
    pub path: PathBuf,
}

/// Progress callbacks for the export pipeline.
pub trait ExportProgress: Send {
    /// Called before the provider fetch goes out.
    fn on_start(&self, symbol: &str, start: NaiveDate, end: NaiveDate);

    /// Called when the export resolves, success or failure.
    fn on_complete(&self, symbol: &str, result: &Result<SnapshotSummary, DataError>);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ExportProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, start: NaiveDate, end: NaiveDate) {
        println!("Fetching {symbol} daily bars from {start} to {end}...");
    }

    fn on_complete(&self, symbol: &str, result: &Result<SnapshotSummary, DataError>) {
        match result {
            Ok(summary) => println!("  OK: {symbol}: {} bars", summary.rows),
            Err(e) => println!("  FAIL: {symbol}: {e}"),
        }
    }
}

/// Progress reporter that drops every event, for tests and embedding.
pub struct SilentProgress;

impl ExportProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _start: NaiveDate, _end: NaiveDate) {}

    fn on_complete(&self, _symbol: &str, _result: &Result<SnapshotSummary, DataError>) {}
}

/// Sort ascending by date and drop duplicate dates, keeping the first
/// occurrence. Upstream data is normally already in this shape; this keeps
/// the snapshot invariants even when it is not.
fn canonicalize(bars: &mut Vec<DailyBar>) {
    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);
}

/// Write bars to a snapshot CSV at `path`.
///
/// Refuses to write an empty snapshot. The write goes to `{path}.tmp` and is
/// renamed into place, replacing whatever was there before.
pub fn write_snapshot(path: &Path, bars: &[DailyBar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::SnapshotWrite(format!(
            "refusing to write an empty snapshot to {}",
            path.display()
        )));
    }

    let tmp_path = path.with_extension("csv.tmp");

    let mut writer = csv::Writer::from_path(&tmp_path)
        .map_err(|e| DataError::SnapshotWrite(format!("create {}: {e}", tmp_path.display())))?;

    for bar in bars {
        writer
            .serialize(SnapshotRow::from(bar))
            .map_err(|e| DataError::SnapshotWrite(format!("serialize row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| DataError::SnapshotWrite(format!("flush {}: {e}", tmp_path.display())))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::SnapshotWrite(format!("atomic rename failed: {e}"))
    })?;

    Ok(())
}

/// Fetch a symbol's daily history and persist it as a snapshot CSV.
///
/// Any failure (provider error, empty result, write error) propagates and
/// leaves no new file at `path`.
pub fn export_snapshot(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    path: &Path,
    progress: &dyn ExportProgress,
) -> Result<SnapshotSummary, DataError> {
    progress.on_start(symbol, start, end);
    let result = export_single(provider, symbol, start, end, path);
    progress.on_complete(symbol, &result);
    result
}

/// Fetch → canonicalize → persist for one symbol.
fn export_single(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    path: &Path,
) -> Result<SnapshotSummary, DataError> {
    let fetched = provider.fetch(symbol, start, end)?;

    let mut bars = fetched.bars;
    canonicalize(&mut bars);

    let (first, last) = match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => {
            return Err(DataError::EmptyRange {
                symbol: symbol.to_string(),
            })
        }
    };

    write_snapshot(path, &bars)?;

    Ok(SnapshotSummary {
        symbol: fetched.symbol,
        rows: bars.len(),
        first,
        last,
        origin: fetched.origin,
        path: path.to_path_buf(),
    })
}
