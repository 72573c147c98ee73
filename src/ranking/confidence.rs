//! Confidence score.
//!
//! An additive signal-alignment heuristic, independent of the weighted
//! composite: each confirming signal adds a fixed number of points, with a
//! tiered contribution for all-time-high proximity and an optional bonus
//! from the already-computed momentum components. Clamped to [0, 100].

use crate::models::{ScoreComponents, StockData};
use crate::scoring::ladder_at_least;

/// All-time-high proximity point rungs.
const ATH_CONFIDENCE_LADDER: &[(f64, f64)] = &[
    (95.0, 20.0),
    (85.0, 15.0),
    (70.0, 10.0),
    (50.0, 5.0),
];

/// Points for the all-time-high signal.
///
/// A fresh all-time high (price above the recorded ATH) gets the full 20
/// points; otherwise the tiered proximity applies. No ATH on record
/// contributes nothing.
fn ath_points(stock: &StockData) -> f64 {
    if stock.high_all_time <= 0.0 {
        return 0.0;
    }
    if stock.price > stock.high_all_time {
        return 20.0;
    }
    let proximity = (stock.price / stock.high_all_time) * 100.0;
    ladder_at_least(proximity, ATH_CONFIDENCE_LADDER, 0.0)
}

/// Calculate the confidence score for a stock.
///
/// When `components` is supplied, a momentum bonus of up to 15 points is
/// added based on the combined price and volume momentum.
pub fn calculate_confidence(stock: &StockData, components: Option<&ScoreComponents>) -> f64 {
    let mut score = 0.0;

    // Price above the 50-day moving average
    if stock.sma_50 > 0.0 && stock.price > stock.sma_50 {
        score += 15.0;
    }

    // Price above the 200-day moving average
    if stock.sma_200 > 0.0 && stock.price > stock.sma_200 {
        score += 10.0;
    }

    // Within 90% of the 52-week high
    if stock.high_52w > 0.0 && (stock.price / stock.high_52w) > 0.90 {
        score += 10.0;
    }

    // All-time-high alignment
    score += ath_points(stock);

    // Volume confirmation
    if stock.rel_volume > 1.2 {
        score += 10.0;
    }

    // Momentum positive across every horizon
    if stock.perf_1w > 0.0 && stock.perf_1m > 0.0 && stock.perf_3m > 0.0 && stock.perf_6m > 0.0 {
        score += 15.0;
    }

    // Low volatility
    if stock.volatility_1m < 5.0 {
        score += 5.0;
    }

    // Momentum bonus from computed components (may be negative when price
    // momentum is negative, hence the lower clamp below)
    if let Some(c) = components {
        score += ((c.price_momentum + c.volume_momentum) / 60.0 * 15.0).min(15.0);
    }

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned_stock() -> StockData {
        StockData {
            price: 100.0,
            sma_50: 90.0,
            sma_200: 80.0,
            high_52w: 102.0,
            high_all_time: 103.0,
            rel_volume: 1.5,
            perf_1w: 1.0,
            perf_1m: 2.0,
            perf_3m: 5.0,
            perf_6m: 10.0,
            volatility_1m: 2.0,
            ..StockData::default()
        }
    }

    #[test]
    fn test_fully_aligned_signals() {
        // 15 + 10 + 10 + 20 (ATH ~97%) + 10 + 15 + 5 = 85
        let score = calculate_confidence(&aligned_stock(), None);
        assert!((score - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_momentum_bonus_caps_at_100() {
        let components = ScoreComponents {
            price_momentum: 100.0,
            volume_momentum: 100.0,
            technical_strength: 0.0,
            breakout_score: 0.0,
            stability_score: 0.0,
        };
        // 85 from signals + bonus capped at 15
        let score = calculate_confidence(&aligned_stock(), Some(&components));
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_signals_scores_zero() {
        let stock = StockData {
            price: 10.0,
            sma_50: 20.0,
            sma_200: 20.0,
            high_52w: 100.0,
            high_all_time: 100.0,
            rel_volume: 0.5,
            perf_1w: -1.0,
            perf_1m: -2.0,
            perf_3m: -5.0,
            perf_6m: -10.0,
            volatility_1m: 12.0,
            ..StockData::default()
        };
        // ATH proximity 10% is below every rung
        assert_eq!(calculate_confidence(&stock, None), 0.0);
    }

    #[test]
    fn test_negative_momentum_bonus_clamped_at_zero() {
        let stock = StockData {
            price: 10.0,
            sma_50: 20.0,
            sma_200: 20.0,
            high_52w: 100.0,
            high_all_time: 100.0,
            rel_volume: 0.5,
            perf_1w: -50.0,
            perf_1m: -50.0,
            perf_3m: -50.0,
            perf_6m: -50.0,
            volatility_1m: 12.0,
            ..StockData::default()
        };
        let components = ScoreComponents {
            price_momentum: -200.0,
            volume_momentum: 0.0,
            technical_strength: 0.0,
            breakout_score: 0.0,
            stability_score: 0.0,
        };
        let score = calculate_confidence(&stock, Some(&components));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_fresh_ath_scores_flat_20() {
        let stock = StockData {
            price: 105.0,
            high_all_time: 100.0,
            high_52w: 0.0,
            sma_50: 0.0,
            sma_200: 0.0,
            rel_volume: 1.0,
            volatility_1m: 10.0,
            perf_1w: -1.0,
            ..StockData::default()
        };
        assert_eq!(calculate_confidence(&stock, None), 20.0);
    }

    #[test]
    fn test_ath_ladder_tiers() {
        let settings_stock = |price: f64| StockData {
            price,
            high_all_time: 100.0,
            high_52w: 0.0,
            sma_50: 0.0,
            sma_200: 0.0,
            rel_volume: 1.0,
            volatility_1m: 10.0,
            perf_1w: -1.0,
            ..StockData::default()
        };
        assert_eq!(calculate_confidence(&settings_stock(96.0), None), 20.0);
        assert_eq!(calculate_confidence(&settings_stock(90.0), None), 15.0);
        assert_eq!(calculate_confidence(&settings_stock(75.0), None), 10.0);
        assert_eq!(calculate_confidence(&settings_stock(55.0), None), 5.0);
        assert_eq!(calculate_confidence(&settings_stock(40.0), None), 0.0);
    }

    #[test]
    fn test_confidence_bounded_for_arbitrary_input() {
        let extreme = StockData {
            price: f64::MAX / 1e10,
            sma_50: 1.0,
            sma_200: 1.0,
            high_52w: 1.0,
            high_all_time: 1.0,
            rel_volume: 1e9,
            perf_1w: 1e9,
            perf_1m: 1e9,
            perf_3m: 1e9,
            perf_6m: 1e9,
            volatility_1m: 0.0,
            ..StockData::default()
        };
        let score = calculate_confidence(&extreme, None);
        assert!((0.0..=100.0).contains(&score));
    }
}
