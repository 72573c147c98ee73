//! Component scoring module.
//!
//! Five independent pure scorers plus a weighted aggregator. Every function
//! here is total: division by an unknown (≤ 0) denominator is guarded at the
//! use site and substitutes a neutral default, so scoring a well-formed
//! `StockData` can never fail.
//!
//! Threshold ladders are expressed as ordered `(boundary, score)` slices
//! evaluated top-down, first match wins.

pub mod breakout;
pub mod price_momentum;
pub mod stability;
pub mod technical;
pub mod volume_momentum;

pub use breakout::calculate_breakout_score;
pub use price_momentum::calculate_price_momentum;
pub use stability::calculate_stability_score;
pub use technical::calculate_technical_strength;
pub use volume_momentum::calculate_volume_momentum;

use crate::config::Settings;
use crate::models::{ScoreComponents, StockData};

/// Evaluate a descending ladder: the value takes the score of the first rung
/// whose boundary it meets (`value >= boundary`), or the fallback.
pub(crate) fn ladder_at_least(value: f64, rungs: &[(f64, f64)], fallback: f64) -> f64 {
    rungs
        .iter()
        .find(|(boundary, _)| value >= *boundary)
        .map(|(_, score)| *score)
        .unwrap_or(fallback)
}

/// Calculate all five score components for a stock.
pub fn calculate_components(stock: &StockData, settings: &Settings) -> ScoreComponents {
    ScoreComponents {
        price_momentum: calculate_price_momentum(stock, settings),
        volume_momentum: calculate_volume_momentum(stock, settings),
        technical_strength: calculate_technical_strength(stock),
        breakout_score: calculate_breakout_score(stock, settings),
        stability_score: calculate_stability_score(stock, settings),
    }
}

/// Combine component scores into the weighted composite.
///
/// Weights are applied exactly as configured; a weight set that does not sum
/// to 1.0 shifts the composite range rather than being normalized.
pub fn calculate_total_score(components: &ScoreComponents, settings: &Settings) -> f64 {
    components.price_momentum * settings.weight_price
        + components.volume_momentum * settings.weight_volume
        + components.technical_strength * settings.weight_technical
        + components.breakout_score * settings.weight_breakout
        + components.stability_score * settings.weight_stability
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_stock() -> StockData {
        StockData {
            symbol: "AAPL".to_string(),
            description: "Apple Inc.".to_string(),
            sector: "Technology".to_string(),
            industry: "Consumer Electronics".to_string(),
            price: 185.50,
            market_cap: 3_000_000_000_000.0,
            beta: 1.15,
            volume_1d: 75_000_000.0,
            volume_1w: 400_000_000.0,
            avg_volume_90d: 65_000_000.0,
            earnings_date: None,
            perf_1w: 2.5,
            perf_1m: 8.3,
            perf_3m: 15.2,
            perf_6m: 25.0,
            perf_1y: 35.0,
            volatility_1m: 2.5,
            high_52w: 195.00,
            high_all_time: 198.00,
            sma_50: 180.25,
            sma_200: 165.50,
            rel_volume: 1.5,
            volume_change: 10.0,
            indexes: "S&P 500, NASDAQ 100".to_string(),
            ..StockData::default()
        }
    }

    #[test]
    fn test_ladder_at_least_first_match_wins() {
        let rungs = [(95.0, 1.3), (85.0, 1.1), (70.0, 0.9)];
        assert_eq!(ladder_at_least(96.0, &rungs, 0.3), 1.3);
        assert_eq!(ladder_at_least(95.0, &rungs, 0.3), 1.3);
        assert_eq!(ladder_at_least(85.0, &rungs, 0.3), 1.1);
        assert_eq!(ladder_at_least(10.0, &rungs, 0.3), 0.3);
    }

    #[test]
    fn test_calculate_components_sample() {
        let settings = Settings::default();
        let components = calculate_components(&sample_stock(), &settings);

        assert!(components.price_momentum > 0.0);
        assert!(components.volume_momentum > 0.0);
        assert!(components.technical_strength > 0.0);
        assert!(components.breakout_score >= 0.0);
        assert!(components.stability_score > 0.0);
    }

    #[test]
    fn test_total_score_applies_weights() {
        let settings = Settings::default();
        let components = ScoreComponents {
            price_momentum: 30.0,
            volume_momentum: 20.0,
            technical_strength: 8.0,
            breakout_score: 7.0,
            stability_score: 6.0,
        };

        let total = calculate_total_score(&components, &settings);
        let expected = 30.0 * 0.40 + 20.0 * 0.30 + 8.0 * 0.10 + 7.0 * 0.10 + 6.0 * 0.10;
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_misconfigured_weights_not_normalized() {
        let settings = Settings {
            weight_price: 2.0,
            weight_volume: 0.0,
            weight_technical: 0.0,
            weight_breakout: 0.0,
            weight_stability: 0.0,
            ..Settings::default()
        };
        let components = ScoreComponents {
            price_momentum: 10.0,
            volume_momentum: 10.0,
            technical_strength: 10.0,
            breakout_score: 10.0,
            stability_score: 10.0,
        };

        // Doubled weight doubles the contribution, no silent rescaling
        assert!((calculate_total_score(&components, &settings) - 20.0).abs() < 1e-9);
    }
}
