//! Price momentum score.
//!
//! A linear blend of the performance percentages, weighted toward the
//! medium-term horizons. Deliberately unclamped: sustained negative
//! performance produces a negative score.

use crate::config::Settings;
use crate::models::StockData;

/// Calculate the weighted price momentum score.
pub fn calculate_price_momentum(stock: &StockData, settings: &Settings) -> f64 {
    stock.perf_6m * settings.price_weight_6m
        + stock.perf_3m * settings.price_weight_3m
        + stock.perf_1m * settings.price_weight_1m
        + stock.perf_1y * settings.price_weight_1y
        + stock.perf_1w * settings.price_weight_1w
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_with_perfs(perf_1w: f64, perf_1m: f64, perf_3m: f64, perf_6m: f64, perf_1y: f64) -> StockData {
        StockData {
            perf_1w,
            perf_1m,
            perf_3m,
            perf_6m,
            perf_1y,
            ..StockData::default()
        }
    }

    #[test]
    fn test_positive_performance_positive_score() {
        let settings = Settings::default();
        let stock = stock_with_perfs(2.5, 8.3, 15.2, 25.0, 35.0);
        assert!(calculate_price_momentum(&stock, &settings) > 0.0);
    }

    #[test]
    fn test_negative_performance_negative_score() {
        let settings = Settings::default();
        let stock = stock_with_perfs(-5.0, -10.0, -20.0, -30.0, -40.0);
        assert!(calculate_price_momentum(&stock, &settings) < 0.0);
    }

    #[test]
    fn test_linear_in_single_horizon() {
        // With only perf_6m set, the score is exactly weight_6m * perf_6m,
        // so doubling the input doubles the score.
        let settings = Settings::default();
        let base = stock_with_perfs(0.0, 0.0, 0.0, 10.0, 0.0);
        let doubled = stock_with_perfs(0.0, 0.0, 0.0, 20.0, 0.0);

        let base_score = calculate_price_momentum(&base, &settings);
        let doubled_score = calculate_price_momentum(&doubled, &settings);

        assert!((base_score - 10.0 * 0.35).abs() < 1e-9);
        assert!((doubled_score - 2.0 * base_score).abs() < 1e-9);
    }

    #[test]
    fn test_zero_stock_scores_zero() {
        let settings = Settings::default();
        let stock = StockData::default();
        assert_eq!(calculate_price_momentum(&stock, &settings), 0.0);
    }
}
