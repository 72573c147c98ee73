//! Volume momentum score.
//!
//! Three volume surge signals, each clamped to `[0, volume_score_cap]` and
//! blended 0.40/0.30/0.30. A ratio at or below 1 means no surge and scores
//! 0; an unknown 90-day average (≤ 0) also scores 0 rather than dividing.

use crate::config::Settings;
use crate::models::StockData;

/// Clamp a raw sub-signal into `[0, cap]`.
fn cap_score(value: f64, cap: f64) -> f64 {
    value.max(0.0).min(cap)
}

/// Score a volume ratio: (ratio - 1) * 10, clamped, 0 when not elevated.
fn ratio_score(ratio: f64, cap: f64) -> f64 {
    if ratio > 1.0 {
        cap_score((ratio - 1.0) * 10.0, cap)
    } else {
        0.0
    }
}

/// Weekly volume vs the 90-day daily average.
fn weekly_volume_ratio(stock: &StockData, cap: f64) -> f64 {
    if stock.avg_volume_90d <= 0.0 {
        return 0.0;
    }
    let weekly_daily_avg = stock.volume_1w / 5.0;
    ratio_score(weekly_daily_avg / stock.avg_volume_90d, cap)
}

/// Daily volume vs the 90-day daily average.
fn daily_volume_ratio(stock: &StockData, cap: f64) -> f64 {
    if stock.avg_volume_90d <= 0.0 {
        return 0.0;
    }
    ratio_score(stock.volume_1d / stock.avg_volume_90d, cap)
}

/// Relative volume as supplied by the screener (already a ratio).
fn relative_volume_score(stock: &StockData, cap: f64) -> f64 {
    ratio_score(stock.rel_volume, cap)
}

/// Calculate the blended volume momentum score.
///
/// Bounded by construction (each term is capped), so the blend is not
/// reclamped.
pub fn calculate_volume_momentum(stock: &StockData, settings: &Settings) -> f64 {
    let cap = settings.volume_score_cap;

    let weekly = weekly_volume_ratio(stock, cap) * 0.40;
    let daily = daily_volume_ratio(stock, cap) * 0.30;
    let rel_vol = relative_volume_score(stock, cap) * 0.30;

    weekly + daily + rel_vol
}
