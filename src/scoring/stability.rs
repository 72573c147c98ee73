//! Stability score.
//!
//! Blends a market-cap tier (bigger is steadier) with a beta tier (moderate
//! beta is ideal). The beta ladder leaves beta < 0.5 scoring 0, same as
//! beta > 2.5 — a documented quirk of the model, kept as-is.

use crate::config::Settings;
use crate::models::StockData;

use super::ladder_at_least;

/// Market cap tier score, boundaries in billions from configuration.
fn mcap_score(market_cap: f64, settings: &Settings) -> f64 {
    let mcap_billions = market_cap / 1_000_000_000.0;
    let rungs = [
        (settings.mcap_mega, 20.0),
        (settings.mcap_large, 16.0),
        (settings.mcap_mid_high, 12.0),
        (settings.mcap_mid, 8.0),
        (settings.mcap_small, 5.0),
    ];
    ladder_at_least(mcap_billions, &rungs, 2.0)
}

/// Beta tier score.
///
/// Beta below 0.5 scores 0, same as beta beyond the very-high tier.
fn beta_score(beta: f64, settings: &Settings) -> f64 {
    if beta < 0.5 {
        return 0.0;
    }
    if beta <= settings.beta_stable_max {
        return 15.0;
    }
    if beta <= settings.beta_moderate_max {
        return 12.0;
    }
    if beta <= settings.beta_high_max {
        return 8.0;
    }
    if beta <= settings.beta_very_high_max {
        return 4.0;
    }
    0.0
}

/// Calculate the stability score.
pub fn calculate_stability_score(stock: &StockData, settings: &Settings) -> f64 {
    let mcap = mcap_score(stock.market_cap, settings) * 0.60;
    let beta = beta_score(stock.beta, settings) * 0.40;

    mcap + beta
}
