//! CSV ingestion.
//!
//! Maps a screener CSV export (TradingView column naming) onto `StockData`
//! rows. Parsing is deliberately lossy on values: an unparsable numeric cell
//! falls back to the field's default (0.0, except ratio-like fields which
//! default to 1.0) and an unparsable date means "no earnings date". Rows
//! without a symbol are dropped. Only a structurally unreadable file is an
//! error.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::StockData;

// ============================================================================
// Column Mapping
// ============================================================================

/// Canonical field -> expected CSV header.
const COLUMN_MAP: &[(&str, &str)] = &[
    ("symbol", "Symbol"),
    ("description", "Description"),
    ("sector", "Sector"),
    ("industry", "Industry"),
    ("price", "Price"),
    ("market_cap", "Market capitalization"),
    ("beta", "Beta 1 year"),
    ("volume_1d", "Volume 1 day"),
    ("volume_1w", "Volume 1 week"),
    ("avg_volume_90d", "Average Volume 90 days"),
    ("earnings_date", "Upcoming earnings date"),
    ("change_1d", "Change % 1 day"),
    ("perf_1w", "Performance % 1 week"),
    ("perf_1m", "Performance % 1 month"),
    ("perf_3m", "Performance % 3 months"),
    ("perf_6m", "Performance % 6 months"),
    ("perf_ytd", "Performance % YTD"),
    ("perf_1y", "Performance % 1 year"),
    ("volatility_1m", "Volatility 1 month"),
    ("high_52w", "High 52 weeks"),
    ("high_all_time", "High All Time"),
    ("sma_50", "Simple Moving Average (50) 1 day"),
    ("sma_200", "Simple Moving Average (200) 1 day"),
    ("rel_volume", "Relative Volume 1 day"),
    ("volume_change", "Volume Change % 1 day"),
    ("indexes", "Index"),
];

// ============================================================================
// Errors
// ============================================================================

/// Errors for structurally unreadable input.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The bytes are not valid UTF-8
    #[error("file is not valid UTF-8")]
    Encoding,

    /// The CSV structure could not be read
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Row Access
// ============================================================================

/// Header-index view over one CSV record.
struct Row<'a> {
    headers: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    fn get(&self, field: &str) -> Option<&'a str> {
        let header = COLUMN_MAP
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, header)| *header)?;
        let idx = *self.headers.get(header)?;
        self.record.get(idx)
    }

    fn string(&self, field: &str) -> String {
        self.get(field).unwrap_or("").trim().to_string()
    }

    fn float(&self, field: &str, default: f64) -> f64 {
        self.get(field)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    fn date(&self, field: &str) -> Option<NaiveDate> {
        let raw = self.get(field)?.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

fn row_to_stock(row: &Row<'_>) -> StockData {
    StockData {
        symbol: row.string("symbol"),
        description: row.string("description"),
        sector: row.string("sector"),
        industry: row.string("industry"),
        price: row.float("price", 0.0),
        market_cap: row.float("market_cap", 0.0),
        beta: row.float("beta", 1.0),
        volume_1d: row.float("volume_1d", 0.0),
        volume_1w: row.float("volume_1w", 0.0),
        avg_volume_90d: row.float("avg_volume_90d", 0.0),
        earnings_date: row.date("earnings_date"),
        change_1d: row.float("change_1d", 0.0),
        perf_1w: row.float("perf_1w", 0.0),
        perf_1m: row.float("perf_1m", 0.0),
        perf_3m: row.float("perf_3m", 0.0),
        perf_6m: row.float("perf_6m", 0.0),
        perf_ytd: row.float("perf_ytd", 0.0),
        perf_1y: row.float("perf_1y", 0.0),
        volatility_1m: row.float("volatility_1m", 0.0),
        high_52w: row.float("high_52w", 0.0),
        high_all_time: row.float("high_all_time", 0.0),
        sma_50: row.float("sma_50", 0.0),
        sma_200: row.float("sma_200", 0.0),
        rel_volume: row.float("rel_volume", 1.0),
        volume_change: row.float("volume_change", 0.0),
        indexes: row.string("indexes"),
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse CSV bytes into a batch of stock rows.
///
/// Unknown columns are ignored; missing columns leave every affected field
/// at its default. Rows without a symbol are dropped.
pub fn parse_csv(content: &[u8]) -> Result<Vec<StockData>, IngestError> {
    let text = std::str::from_utf8(content).map_err(|_| IngestError::Encoding)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect();

    let mut stocks = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;
        let row = Row {
            headers: &headers,
            record: &record,
        };
        let stock = row_to_stock(&row);

        if stock.symbol.is_empty() {
            dropped += 1;
            continue;
        }
        stocks.push(stock);
    }

    debug!(parsed = stocks.len(), dropped, "CSV ingestion complete");
    Ok(stocks)
}

// ============================================================================
// Tests
// ============================================================================
