//! Breakout score.
//!
//! A base score from 52-week-high proximity and volume confirmation, scaled
//! by a multiplier that rewards closeness to the all-time high and penalizes
//! distance from it. Capped at 30.0.

use crate::config::Settings;
use crate::models::StockData;

use super::ladder_at_least;

/// Maximum breakout score.
const BREAKOUT_SCORE_CAP: f64 = 30.0;

/// Neutral proximity % assumed when the 52-week high is unknown.
const UNKNOWN_HISTORY_PROXIMITY: f64 = 50.0;

/// All-time-high proximity multiplier rungs.
const ATH_MULTIPLIER_LADDER: &[(f64, f64)] = &[
    (95.0, 1.3),
    (85.0, 1.1),
    (70.0, 0.9),
    (50.0, 0.7),
    (30.0, 0.5),
];

/// Base score from 52-week proximity with volume confirmation on the two
/// highest rungs.
fn base_score(proximity_52w: f64, rel_volume: f64, settings: &Settings) -> f64 {
    if proximity_52w >= settings.high_52w_breakout_threshold {
        if rel_volume >= settings.rel_vol_breakout_threshold {
            return 25.0;
        }
        return 20.0;
    }

    if proximity_52w >= settings.high_52w_near_threshold {
        if rel_volume >= settings.rel_vol_near_threshold {
            return 18.0;
        }
        return 15.0;
    }

    if proximity_52w >= 80.0 {
        return 12.0;
    }
    if proximity_52w >= 70.0 {
        return 8.0;
    }
    5.0
}

/// Calculate the breakout score.
pub fn calculate_breakout_score(stock: &StockData, settings: &Settings) -> f64 {
    let proximity_52w = if stock.high_52w > 0.0 {
        (stock.price / stock.high_52w) * 100.0
    } else {
        // Unknown trading history is treated as neutral, not hopeless
        UNKNOWN_HISTORY_PROXIMITY
    };

    // A record with no ATH data, or one showing a fresh all-time high, falls
    // back to the 52-week proximity.
    let ath_proximity = if stock.high_all_time <= 0.0 || stock.high_all_time < stock.price {
        proximity_52w
    } else {
        (stock.price / stock.high_all_time) * 100.0
    };

    let base = base_score(proximity_52w, stock.rel_volume, settings);
    let multiplier = ladder_at_least(ath_proximity, ATH_MULTIPLIER_LADDER, 0.3);

    (base * multiplier).min(BREAKOUT_SCORE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakout_stock(price: f64, high_52w: f64, high_all_time: f64, rel_volume: f64) -> StockData {
        StockData {
            price,
            high_52w,
            high_all_time,
            rel_volume,
            ..StockData::default()
        }
    }

    #[test]
    fn test_at_high_with_volume_capped_at_30() {
        let settings = Settings::default();
        // 52w proximity 100% with rel_volume 2.0 -> base 25; no ATH data ->
        // ATH proximity falls back to 100% -> multiplier 1.3. 25 * 1.3 is
        // capped at 30, not 32.5.
        let stock = breakout_stock(100.0, 100.0, 0.0, 2.0);
        let score = calculate_breakout_score(&stock, &settings);
        assert!((score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_at_high_without_volume() {
        let settings = Settings::default();
        let stock = breakout_stock(100.0, 100.0, 100.0, 1.0);
        // base 20, ATH proximity 100% -> 1.3, capped contribution 26.0
        assert!((calculate_breakout_score(&stock, &settings) - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_high_tier_with_volume() {
        let settings = Settings::default();
        let stock = breakout_stock(92.0, 100.0, 100.0, 1.3);
        // base 18 (>=90 with rel_vol >= 1.2), ATH 92% -> 1.1
        assert!((calculate_breakout_score(&stock, &settings) - 18.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_52w_high_is_neutral() {
        let settings = Settings::default();
        let stock = breakout_stock(100.0, 0.0, 0.0, 1.0);
        // proximity sentinel 50 -> base 5; ATH falls back to 50 -> 0.7
        assert!((calculate_breakout_score(&stock, &settings) - 5.0 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_ath_uses_52w_proximity() {
        let settings = Settings::default();
        // Price above the recorded all-time high: the multiplier comes from
        // the 52-week proximity (100%), not the stale ATH ratio.
        let stock = breakout_stock(110.0, 110.0, 100.0, 1.0);
        // base 20, multiplier 1.3, capped at 26
        assert!((calculate_breakout_score(&stock, &settings) - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_far_from_ath_penalized() {
        let settings = Settings::default();
        // Near 52w high but at 20% of the all-time high (deep drawdown)
        let stock = breakout_stock(96.0, 100.0, 480.0, 1.0);
        // base 20, multiplier 0.3
        assert!((calculate_breakout_score(&stock, &settings) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_mid_tiers() {
        let settings = Settings::default();
        // 85% proximity -> base 12; ATH 85% -> 1.1
        let stock = breakout_stock(85.0, 100.0, 100.0, 1.0);
        assert!((calculate_breakout_score(&stock, &settings) - 12.0 * 1.1).abs() < 1e-9);

        // 75% proximity -> base 8; ATH 75% -> 0.9
        let stock = breakout_stock(75.0, 100.0, 100.0, 1.0);
        assert!((calculate_breakout_score(&stock, &settings) - 8.0 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let settings = Settings::default();
        let cases = [
            breakout_stock(0.0, 0.0, 0.0, 0.0),
            breakout_stock(1000.0, 1.0, 1.0, 100.0),
            breakout_stock(50.0, 100.0, 200.0, 0.5),
            breakout_stock(100.0, 100.0, 100.0, 2.0),
        ];
        for stock in &cases {
            let score = calculate_breakout_score(stock, &settings);
            assert!((0.0..=30.0).contains(&score), "score {} out of range", score);
        }
    }
}
