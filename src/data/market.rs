//! Market overview data.
//!
//! Fetches major index ETF quotes (SPY, QQQ, IWM) from the Yahoo Finance
//! chart API and derives percentage changes over standard horizons from the
//! 1-year daily close series. A failed symbol is logged and skipped; the
//! overview degrades gracefully rather than failing the request.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Yahoo Finance chart API base.
const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Tracked index ETFs.
const MARKET_ETFS: &[(&str, &str)] = &[
    ("SPY", "S&P 500"),
    ("QQQ", "NASDAQ 100"),
    ("IWM", "Russell 2000"),
];

/// Approximate trading-day offsets: 5 = 1 week, 21 = 1 month, 63 = 3 months,
/// 126 = 6 months.
const OFFSET_1W: usize = 5;
const OFFSET_1M: usize = 21;
const OFFSET_3M: usize = 63;
const OFFSET_6M: usize = 126;

// ============================================================================
// Types
// ============================================================================

/// Index ETF snapshot with period changes (all in %).
#[derive(Debug, Clone, Serialize)]
pub struct MarketEtf {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_1d: f64,
    pub change_1w: f64,
    pub change_1m: f64,
    pub change_3m: f64,
    pub change_6m: f64,
    pub change_ytd: f64,
    pub change_1y: f64,
}

/// Period changes computed from a close series.
#[derive(Debug, Clone, Copy, Default)]
struct PeriodChanges {
    change_1w: f64,
    change_1m: f64,
    change_3m: f64,
    change_6m: f64,
    change_ytd: f64,
    change_1y: f64,
}

// ============================================================================
// Yahoo Chart Response
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Change Computation
// ============================================================================

fn pct_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return 0.0;
    }
    (to - from) / from * 100.0
}

/// Close at `offset` trading days back, if the series reaches that far.
fn close_at_offset(closes: &[f64], offset: usize) -> Option<f64> {
    if closes.len() > offset {
        Some(closes[closes.len() - 1 - offset])
    } else {
        None
    }
}

/// Derive period changes from a (timestamp, close) series ending at the most
/// recent close. YTD measures from the first close of `current_year`.
fn compute_period_changes(series: &[(i64, f64)], current_year: i32) -> PeriodChanges {
    let Some(&(_, current)) = series.last() else {
        return PeriodChanges::default();
    };
    let closes: Vec<f64> = series.iter().map(|(_, c)| *c).collect();

    let change_at = |offset: usize| {
        close_at_offset(&closes, offset)
            .map(|past| pct_change(past, current))
            .unwrap_or(0.0)
    };

    let ytd_start = series
        .iter()
        .find(|(ts, _)| {
            DateTime::from_timestamp(*ts, 0)
                .map(|dt| dt.year() == current_year)
                .unwrap_or(false)
        })
        .map(|(_, close)| *close)
        .unwrap_or(closes[0]);

    PeriodChanges {
        change_1w: change_at(OFFSET_1W),
        change_1m: change_at(OFFSET_1M),
        change_3m: change_at(OFFSET_3M),
        change_6m: change_at(OFFSET_6M),
        change_ytd: pct_change(ytd_start, current),
        change_1y: pct_change(closes[0], current),
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the Yahoo Finance chart API.
pub struct MarketDataClient {
    client: reqwest::Client,
}

impl MarketDataClient {
    /// Create a new market data client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch the full market overview, skipping symbols that fail.
    pub async fn fetch_overview(&self) -> Vec<MarketEtf> {
        let mut overview = Vec::with_capacity(MARKET_ETFS.len());

        for (symbol, name) in MARKET_ETFS {
            match self.fetch_etf(symbol, name).await {
                Ok(etf) => {
                    debug!(symbol, price = etf.price, "Fetched index ETF");
                    overview.push(etf);
                }
                Err(e) => {
                    warn!(symbol, error = %e, "Failed to fetch index ETF");
                }
            }
        }

        overview
    }

    async fn fetch_etf(&self, symbol: &str, name: &str) -> Result<MarketEtf> {
        // Current price and day change come from the 1-day chart metadata
        let daily = self
            .fetch_chart(symbol, "1d")
            .await
            .context("fetching daily chart")?;

        let price = daily.meta.regular_market_price.unwrap_or(0.0);
        let prev_close = daily
            .meta
            .chart_previous_close
            .or(daily.meta.previous_close)
            .unwrap_or(0.0);
        let change_1d = pct_change(prev_close, price);

        // Period changes come from the 1-year daily close series
        let yearly = self
            .fetch_chart(symbol, "1y")
            .await
            .context("fetching yearly chart")?;

        let series = close_series(&yearly);
        let changes = compute_period_changes(&series, Local::now().year());

        Ok(MarketEtf {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_1d,
            change_1w: changes.change_1w,
            change_1m: changes.change_1m,
            change_3m: changes.change_3m,
            change_6m: changes.change_6m,
            change_ytd: changes.change_ytd,
            change_1y: changes.change_1y,
        })
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult> {
        let url = format!(
            "{}/{}?interval=1d&range={}",
            YAHOO_CHART_URL, symbol, range
        );

        let response: ChartResponse = self
            .client
            .get(&url)
            .send()
            .await
            .context("chart request failed")?
            .error_for_status()
            .context("chart request rejected")?
            .json()
            .await
            .context("chart response was not valid JSON")?;

        response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .context("chart response contained no result")
    }
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pair timestamps with non-null closes, dropping gaps.
fn close_series(result: &ChartResult) -> Vec<(i64, f64)> {
    let timestamps = result.timestamp.as_deref().unwrap_or(&[]);
    let closes = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
        .and_then(|q| q.close.as_deref())
        .unwrap_or(&[]);

    timestamps
        .iter()
        .zip(closes.iter())
        .filter_map(|(ts, close)| close.map(|c| (*ts, c)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
