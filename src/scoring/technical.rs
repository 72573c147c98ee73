//! Technical strength score.
//!
//! Blends trend position against the moving averages, proximity to the
//! 52-week high, and a low-volatility bonus. The proximity term is NOT
//! capped at 100: a stock trading above its 52-week high pushes this
//! sub-score past the nominal ceiling, and the composite inherits that.

use crate::models::StockData;

/// Volatility bonus rungs, evaluated top-down with `<` semantics.
const VOLATILITY_LADDER: &[(f64, f64)] = &[(3.0, 15.0), (5.0, 10.0), (8.0, 5.0)];

/// Trend score from price vs the 50- and 200-day moving averages.
///
/// Each leg contributes up to 25; the sum is clamped to [0, 50]. A missing
/// moving average (≤ 0) contributes nothing.
fn trend_score(stock: &StockData) -> f64 {
    let mut score = 0.0;

    if stock.sma_50 > 0.0 {
        let sma50_ratio = (stock.price / stock.sma_50) - 1.0;
        score += (sma50_ratio * 50.0).min(25.0);
    }

    if stock.sma_200 > 0.0 {
        let sma200_ratio = (stock.price / stock.sma_200) - 1.0;
        score += (sma200_ratio * 25.0).min(25.0);
    }

    score.clamp(0.0, 50.0)
}

/// Proximity to the 52-week high as a percentage, 0 when the high is unknown.
fn proximity_52w(stock: &StockData) -> f64 {
    if stock.high_52w <= 0.0 {
        return 0.0;
    }
    (stock.price / stock.high_52w) * 100.0
}

/// Bonus for low 1-month volatility.
fn volatility_adjustment(volatility: f64) -> f64 {
    for (boundary, score) in VOLATILITY_LADDER {
        if volatility < *boundary {
            return *score;
        }
    }
    0.0
}

/// Calculate the technical strength score.
pub fn calculate_technical_strength(stock: &StockData) -> f64 {
    let trend = trend_score(stock) * 0.40;
    let proximity = proximity_52w(stock) * 0.40;
    let volatility_adj = volatility_adjustment(stock.volatility_1m) * 0.20;

    trend + proximity + volatility_adj
}
