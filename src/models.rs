//! Domain models for the momentum ranker.
//!
//! All types here are plain immutable value objects. A `StockData` is built
//! once by the CSV ingester, scored into `ScoreComponents`, and wrapped into
//! a `RankedStock` by the ranking pass. Nothing in this module mutates after
//! construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Stock Data
// ============================================================================

/// One row of screener data for a single security.
///
/// Numeric fields default to 0.0 and are never absent; the ingester coerces
/// unparsable values before this type is constructed. Fields used as
/// denominators (volumes, moving averages, highs) are guarded at every use
/// site rather than validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    /// Ticker symbol (e.g. "AAPL")
    pub symbol: String,
    /// Company name / description
    pub description: String,
    /// Sector classification
    pub sector: String,
    /// Industry classification (finer than sector)
    pub industry: String,
    /// Last price
    pub price: f64,
    /// Market capitalization in currency units (not billions)
    pub market_cap: f64,
    /// 1-year beta
    pub beta: f64,
    /// Trading volume, last day
    pub volume_1d: f64,
    /// Trading volume, last week
    pub volume_1w: f64,
    /// Average daily volume over 90 days
    pub avg_volume_90d: f64,
    /// Upcoming earnings date, if known
    pub earnings_date: Option<NaiveDate>,
    /// Day change %
    pub change_1d: f64,
    /// Performance % over 1 week
    pub perf_1w: f64,
    /// Performance % over 1 month
    pub perf_1m: f64,
    /// Performance % over 3 months
    pub perf_3m: f64,
    /// Performance % over 6 months
    pub perf_6m: f64,
    /// Performance % year to date
    pub perf_ytd: f64,
    /// Performance % over 1 year
    pub perf_1y: f64,
    /// 1-month volatility %
    pub volatility_1m: f64,
    /// 52-week high price
    pub high_52w: f64,
    /// All-time high price
    pub high_all_time: f64,
    /// 50-day simple moving average
    pub sma_50: f64,
    /// 200-day simple moving average
    pub sma_200: f64,
    /// Relative volume ratio (current vs baseline, precomputed upstream)
    pub rel_volume: f64,
    /// Day-over-day volume change %
    pub volume_change: f64,
    /// Index membership, free text (e.g. "S&P 500, NASDAQ 100")
    pub indexes: String,
}

impl StockData {
    /// Proximity to the 52-week high as a ratio (0 when the high is unknown).
    ///
    /// Used by the analytics breakout-candidate ranking; the breakout scorer
    /// has its own sentinel semantics and does not call this.
    pub fn high_52w_proximity(&self) -> f64 {
        if self.high_52w <= 0.0 {
            return 0.0;
        }
        self.price / self.high_52w
    }
}

impl Default for StockData {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            description: String::new(),
            sector: String::new(),
            industry: String::new(),
            price: 0.0,
            market_cap: 0.0,
            beta: 1.0,
            volume_1d: 0.0,
            volume_1w: 0.0,
            avg_volume_90d: 0.0,
            earnings_date: None,
            change_1d: 0.0,
            perf_1w: 0.0,
            perf_1m: 0.0,
            perf_3m: 0.0,
            perf_6m: 0.0,
            perf_ytd: 0.0,
            perf_1y: 0.0,
            volatility_1m: 0.0,
            high_52w: 0.0,
            high_all_time: 0.0,
            sma_50: 0.0,
            sma_200: 0.0,
            rel_volume: 1.0,
            volume_change: 0.0,
            indexes: String::new(),
        }
    }
}

// ============================================================================
// Score Components
// ============================================================================

/// The five independent sub-scores for one security.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Weighted blend of performance percentages (unclamped, may be negative)
    pub price_momentum: f64,
    /// Volume surge score, each sub-signal capped by configuration
    pub volume_momentum: f64,
    /// Trend + 52-week proximity + volatility adjustment
    pub technical_strength: f64,
    /// Breakout potential, in [0, 30]
    pub breakout_score: f64,
    /// Market-cap and beta tier blend
    pub stability_score: f64,
}

// ============================================================================
// Ranked Stock
// ============================================================================

/// A security with its full scoring output and position in the ranked batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStock {
    /// The raw screener row
    pub data: StockData,
    /// Component sub-scores
    pub components: ScoreComponents,
    /// Weighted composite score
    pub total_score: f64,
    /// Signal-alignment confidence in [0, 100]
    pub confidence: f64,
    /// 1-based dense rank; unique and contiguous across the batch
    pub rank: usize,
    /// Whether rank <= configured top-N
    pub is_top: bool,
    /// Whether the security is outside the earnings exclusion window
    pub earnings_safe: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stock_has_neutral_ratios() {
        let stock = StockData::default();
        assert_eq!(stock.beta, 1.0);
        assert_eq!(stock.rel_volume, 1.0);
        assert_eq!(stock.price, 0.0);
        assert!(stock.earnings_date.is_none());
    }

    #[test]
    fn test_high_52w_proximity() {
        let stock = StockData {
            price: 90.0,
            high_52w: 100.0,
            ..StockData::default()
        };
        assert!((stock.high_52w_proximity() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_high_52w_proximity_unknown_high() {
        let stock = StockData {
            price: 90.0,
            high_52w: 0.0,
            ..StockData::default()
        };
        assert_eq!(stock.high_52w_proximity(), 0.0);
    }
}
