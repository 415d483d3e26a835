//! Snapshot CSV import — reads a previously exported snapshot back into bars.
//!
//! The header must lead with `Date` (case-insensitive). Rows that fail to
//! parse are skipped and counted rather than aborting the load; a file with
//! no valid rows is an error.

use std::path::Path;

use super::provider::DataError;
use super::snapshot::SnapshotRow;
use crate::domain::DailyBar;

/// Result of loading a snapshot CSV.
#[derive(Debug)]
pub struct ImportSummary {
    pub bars: Vec<DailyBar>,
    pub skipped: usize,
}

/// Load daily bars from a snapshot CSV at `path`.
pub fn load_snapshot_csv(path: &Path) -> Result<ImportSummary, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::Import(format!("open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::Import(format!("read header of {}: {e}", path.display())))?;

    match headers.get(0) {
        Some(first) if first.trim().eq_ignore_ascii_case("date") => {}
        _ => {
            return Err(DataError::Import(format!(
                "unexpected header in {}: first column must be Date",
                path.display()
            )))
        }
    }

    let mut bars = Vec::new();
    let mut skipped = 0;

    for record in reader.deserialize::<SnapshotRow>() {
        match record {
            Ok(row) => bars.push(DailyBar::from(row)),
            Err(_) => skipped += 1,
        }
    }

    if bars.is_empty() {
        return Err(DataError::Import(format!(
            "no valid data rows in {}",
            path.display()
        )));
    }

    Ok(ImportSummary { bars, skipped })
}
