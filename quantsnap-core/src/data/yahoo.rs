//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API with bounded retries,
//! exponential backoff, and the circuit breaker. Yahoo has no official API
//! and changes formats without notice; parse failures surface as
//! `DataError::FormatChanged` rather than panics.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, FetchOrigin, FetchResult, MarketDataProvider};
use crate::domain::DailyBar;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartSeries>>,
    error: Option<ChartFault>,
}

#[derive(Debug, Deserialize)]
struct ChartFault {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    timestamp: Option<Vec<i64>>,
    indicators: SeriesIndicators,
}

#[derive(Debug, Deserialize)]
struct SeriesIndicators {
    quote: Vec<SeriesQuote>,
}

#[derive(Debug, Deserialize)]
struct SeriesQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(breaker: Arc<CircuitBreaker>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            breaker,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Chart API URL for a symbol and date range.
    ///
    /// `period1` is the start at midnight UTC, `period2` the (exclusive) end
    /// at midnight UTC, so the last session fetched is the trading day
    /// before `end`.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let period2 = end.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={period1}&period2={period2}&interval=1d"
        )
    }

    /// Flatten the column-major chart payload into row-major daily bars.
    ///
    /// Rows missing any OHLC value are dropped (holidays and half-populated
    /// sessions); volume defaults to zero when absent.
    fn decode_series(symbol: &str, envelope: ChartEnvelope) -> Result<Vec<DailyBar>, DataError> {
        let result = envelope.chart.result.ok_or_else(|| {
            if let Some(fault) = envelope.chart.error {
                if fault.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::FormatChanged(format!("{}: {}", fault.code, fault.description))
                }
            } else {
                DataError::FormatChanged("empty result with no error".into())
            }
        })?;

        let series = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::FormatChanged("result array is empty".into()))?;

        let timestamps = series
            .timestamp
            .ok_or_else(|| DataError::FormatChanged("no timestamps".into()))?;

        let quote = series
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::FormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| DataError::FormatChanged(format!("invalid timestamp: {ts}")))?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();

            if let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) {
                let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
                bars.push(DailyBar::new(date, open, high, low, close, volume));
            }
        }

        if bars.is_empty() {
            return Err(DataError::EmptyRange {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }

    fn fetch_with_retry(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        if !self.breaker.allows() {
            return Err(DataError::CircuitOpen);
        }

        let url = Self::chart_url(symbol, start, end);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            if !self.breaker.allows() {
                return Err(DataError::CircuitOpen);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        // IP ban — stop hitting the endpoint at once
                        self.breaker.open_now();
                        return Err(DataError::CircuitOpen);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.breaker.on_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.breaker.on_failure();
                        last_error = Some(DataError::Network(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let envelope: ChartEnvelope = resp.json().map_err(|e| {
                        DataError::FormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    let bars = Self::decode_series(symbol, envelope)?;
                    self.breaker.on_success();
                    return Ok(bars);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::Network(e.to_string()));
                        continue;
                    }
                    return Err(DataError::Network(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Network("max retries exceeded".into())))
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let bars = self.fetch_with_retry(symbol, start, end)?;
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            origin: FetchOrigin::YahooFinance,
        })
    }

    fn is_available(&self) -> bool {
        self.breaker.allows()
    }
}
