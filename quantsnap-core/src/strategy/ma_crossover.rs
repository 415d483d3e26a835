//! Moving average crossover — buy on the golden cross, sell on the death cross.
//!
//! Signals stay Hold through the long-window warmup and on the first bar
//! where both averages exist, since there is no previous pair to compare
//! against.

use crate::domain::{DailyBar, TradeSignal};

use super::{StrategyError, TradingStrategy};

/// Crossover of two simple moving averages over closing prices.
///
/// Buy when the short average crosses above the long one (previously at or
/// below, now strictly above); Sell on the mirror-image cross below; Hold
/// otherwise.
#[derive(Debug, Clone)]
pub struct MaCrossoverStrategy {
    short_window: usize,
    long_window: usize,
}

impl MaCrossoverStrategy {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, StrategyError> {
        if short_window == 0 || long_window == 0 {
            return Err(StrategyError::InvalidParams(
                "short_window and long_window must be positive".into(),
            ));
        }
        if short_window >= long_window {
            return Err(StrategyError::InvalidParams(
                "short_window must be less than long_window".into(),
            ));
        }
        Ok(Self {
            short_window,
            long_window,
        })
    }
}

impl TradingStrategy for MaCrossoverStrategy {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn generate_signals(&self, bars: &[DailyBar]) -> Vec<TradeSignal> {
        let n = bars.len();
        let mut signals = vec![TradeSignal::Hold; n];
        if n == 0 {
            return signals;
        }

        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let short = rolling_mean(&closes, self.short_window);
        let long = rolling_mean(&closes, self.long_window);

        for i in self.long_window..n {
            let (short_cur, long_cur) = (short[i], long[i]);
            let (short_prev, long_prev) = (short[i - 1], long[i - 1]);

            if short_cur.is_nan()
                || long_cur.is_nan()
                || short_prev.is_nan()
                || long_prev.is_nan()
            {
                continue;
            }

            if short_cur > long_cur && short_prev <= long_prev {
                signals[i] = TradeSignal::Buy;
            } else if short_cur < long_cur && short_prev >= long_prev {
                signals[i] = TradeSignal::Sell;
            }
        }

        signals
    }
}

/// Rolling mean over a trailing window; NaN before the window fills.
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = sum / window as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
        let base = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        closes
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
            .collect()
    }

    #[test]
    fn one_signal_per_bar() {
        let strategy = MaCrossoverStrategy::new(2, 3).unwrap();
        let bars = bars_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(strategy.generate_signals(&bars).len(), bars.len());
    }

    #[test]
    fn empty_input_yields_no_signals() {
        let strategy = MaCrossoverStrategy::new(2, 3).unwrap();
        assert!(strategy.generate_signals(&[]).is_empty());
    }

    #[test]
    fn buys_on_cross_above_and_sells_on_cross_below() {
        let strategy = MaCrossoverStrategy::new(2, 3).unwrap();
        // sma2: _, 10, 10, 10, 13, 19, 16, 7
        // sma3: _, _,  10, 10, 12, 16, 16, 12
        let bars = bars_from_closes(&[10.0, 10.0, 10.0, 10.0, 16.0, 22.0, 10.0, 4.0]);
        let signals = strategy.generate_signals(&bars);

        assert_eq!(signals[4], TradeSignal::Buy);
        assert_eq!(signals[7], TradeSignal::Sell);
        for (i, signal) in signals.iter().enumerate() {
            if i != 4 && i != 7 {
                assert_eq!(*signal, TradeSignal::Hold, "bar {i} should hold");
            }
        }
    }

    #[test]
    fn holds_through_warmup_even_when_averages_diverge() {
        let strategy = MaCrossoverStrategy::new(1, 2).unwrap();
        // sma1: 10, 5, 30; sma2: _, 7.5, 17.5 — bar 1 is the first bar with
        // both averages, but there is no previous pair to compare.
        let bars = bars_from_closes(&[10.0, 5.0, 30.0]);
        let signals = strategy.generate_signals(&bars);

        assert_eq!(signals[0], TradeSignal::Hold);
        assert_eq!(signals[1], TradeSignal::Hold);
        assert_eq!(signals[2], TradeSignal::Buy);
    }

    #[test]
    fn flat_series_never_fires() {
        let strategy = MaCrossoverStrategy::new(2, 3).unwrap();
        let bars = bars_from_closes(&[10.0; 20]);
        let signals = strategy.generate_signals(&bars);
        assert!(signals.iter().all(|s| *s == TradeSignal::Hold));
    }

    #[test]
    fn rejects_zero_windows() {
        let err = MaCrossoverStrategy::new(0, 50).unwrap_err();
        assert!(matches!(err, StrategyError::InvalidParams(_)));
    }

    #[test]
    fn rejects_short_not_less_than_long() {
        let err = MaCrossoverStrategy::new(50, 50).unwrap_err();
        assert!(err.to_string().contains("less than"));
    }

    #[test]
    fn rolling_mean_fills_nan_before_window() {
        let means = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 3);
        assert!(means[0].is_nan());
        assert!(means[1].is_nan());
        assert_eq!(means[2], 4.0);
        assert_eq!(means[3], 6.0);
    }

    #[test]
    fn rolling_mean_short_input_is_all_nan() {
        let means = rolling_mean(&[2.0, 4.0], 3);
        assert!(means.iter().all(|m| m.is_nan()));
    }
}
