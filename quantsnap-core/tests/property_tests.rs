//! Property tests for snapshot and strategy invariants.
//!
//! Uses proptest to verify:
//! 1. Snapshot normalization — exported files always carry unique,
//!    ascending dates regardless of provider ordering or duplicates
//! 2. Signal alignment — strategies emit exactly one signal per bar and
//!    stay silent through the warmup window

use chrono::NaiveDate;
use proptest::prelude::*;

use quantsnap_core::data::{
    export_snapshot, load_snapshot_csv, DataError, FetchOrigin, FetchResult, MarketDataProvider,
    SilentProgress,
};
use quantsnap_core::domain::{DailyBar, TradeSignal};
use quantsnap_core::strategy::{MaCrossoverStrategy, TradingStrategy};

struct ReplayProvider {
    bars: Vec<DailyBar>,
}

impl MarketDataProvider for ReplayProvider {
    fn name(&self) -> &str {
        "replay"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: self.bars.clone(),
            origin: FetchOrigin::Fixture,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_bar() -> impl Strategy<Value = DailyBar> {
    (0i64..500, arb_price(), 0u64..10_000_000).prop_map(|(day_offset, close, volume)| {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
            + chrono::Duration::days(day_offset);
        DailyBar::new(date, close - 0.5, close + 1.0, close - 1.0, close, volume)
    })
}

// ── 1. Snapshot normalization ────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever order (and duplication) the provider returns, the exported
    /// file has strictly ascending, unique dates.
    #[test]
    fn exported_dates_are_unique_ascending(bars in prop::collection::vec(arb_bar(), 1..40)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        let provider = ReplayProvider { bars };

        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        export_snapshot(&provider, "SPY", start, end, &path, &SilentProgress).unwrap();

        let loaded = load_snapshot_csv(&path).unwrap();
        let dates: Vec<NaiveDate> = loaded.bars.iter().map(|b| b.date).collect();
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1], "dates out of order: {} !< {}", pair[0], pair[1]);
        }
    }
}

// ── 2. Signal alignment ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// One signal per bar, and nothing fires inside the warmup window.
    #[test]
    fn signals_align_and_respect_warmup(
        closes in prop::collection::vec(arb_price(), 0..120),
        short in 1usize..10,
        spread in 1usize..50,
    ) {
        let long = short + spread;
        let strategy = MaCrossoverStrategy::new(short, long).unwrap();

        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let bars: Vec<DailyBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                DailyBar::new(
                    base + chrono::Duration::days(i as i64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1_000,
                )
            })
            .collect();

        let signals = strategy.generate_signals(&bars);
        prop_assert_eq!(signals.len(), bars.len());

        for (i, signal) in signals.iter().enumerate().take(long.min(signals.len())) {
            prop_assert_eq!(*signal, TradeSignal::Hold, "bar {} fired during warmup", i);
        }
    }
}
