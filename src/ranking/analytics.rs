//! Portfolio analytics.
//!
//! Cross-sectional statistics over a ranked batch: industry leaders, sector
//! distribution, top movers per horizon, volume leaders, and breakout
//! candidates. An empty batch produces an all-zero/empty summary, never an
//! error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::RankedStock;

/// Number of entries kept in each leaderboard.
const LEADERBOARD_SIZE: usize = 5;

/// Minimum members for an industry to be considered trending.
const MIN_INDUSTRY_MEMBERS: usize = 2;

// ============================================================================
// Types
// ============================================================================

/// Aggregate statistics for one industry group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryStats {
    /// Industry name
    pub name: String,
    /// Sector the industry belongs to
    pub sector: String,
    /// Number of ranked members
    pub count: usize,
    /// Mean composite score over the members
    pub avg_score: f64,
    /// Symbol of the best-ranked member
    pub top_stock: String,
}

/// Portfolio-wide analytics derived from one ranked batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    /// Total number of ranked stocks
    pub total_stocks: usize,
    /// Mean composite score
    pub avg_score: f64,
    /// Mean confidence
    pub avg_confidence: f64,
    /// Mean composite score over the top-N stocks (0 when none)
    pub top_avg_score: f64,
    /// Stocks outside the earnings exclusion window
    pub earnings_safe_count: usize,
    /// Top industries (>= 2 members) by mean score
    pub trending_industries: Vec<IndustryStats>,
    /// Stock count per sector
    pub sector_distribution: HashMap<String, usize>,
    /// Symbols with the highest 1-week performance
    pub top_movers_1w: Vec<String>,
    /// Symbols with the highest 1-month performance
    pub top_movers_1m: Vec<String>,
    /// Symbols with the highest 6-month performance
    pub top_movers_6m: Vec<String>,
    /// Symbols with the highest relative volume
    pub volume_leaders: Vec<String>,
    /// Symbols nearest their 52-week high
    pub breakout_candidates: Vec<String>,
}

impl Analytics {
    /// The all-zero summary served before any batch has been ranked.
    pub fn empty() -> Self {
        Self {
            total_stocks: 0,
            avg_score: 0.0,
            avg_confidence: 0.0,
            top_avg_score: 0.0,
            earnings_safe_count: 0,
            trending_industries: Vec::new(),
            sector_distribution: HashMap::new(),
            top_movers_1w: Vec::new(),
            top_movers_1m: Vec::new(),
            top_movers_6m: Vec::new(),
            volume_leaders: Vec::new(),
            breakout_candidates: Vec::new(),
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Top industries by mean score, skipping single-member groups.
fn trending_industries(stocks: &[RankedStock]) -> Vec<IndustryStats> {
    let mut groups: HashMap<&str, Vec<&RankedStock>> = HashMap::new();
    for stock in stocks {
        groups.entry(&stock.data.industry).or_default().push(stock);
    }

    let mut stats: Vec<IndustryStats> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_INDUSTRY_MEMBERS)
        .map(|(name, members)| {
            let avg = members.iter().map(|s| s.total_score).sum::<f64>() / members.len() as f64;
            // Members carry the batch-wide rank; the minimum is the leader
            let top = members
                .iter()
                .min_by_key(|s| s.rank)
                .expect("group has at least two members");
            IndustryStats {
                name: name.to_string(),
                sector: top.data.sector.clone(),
                count: members.len(),
                avg_score: avg,
                top_stock: top.data.symbol.clone(),
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.avg_score
            .partial_cmp(&a.avg_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats.truncate(LEADERBOARD_SIZE);
    stats
}

/// Stock count per sector.
fn sector_distribution(stocks: &[RankedStock]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for stock in stocks {
        *counts.entry(stock.data.sector.clone()).or_insert(0) += 1;
    }
    counts
}

/// Top symbols by an arbitrary descending metric.
fn leaderboard<F>(stocks: &[RankedStock], metric: F) -> Vec<String>
where
    F: Fn(&RankedStock) -> f64,
{
    let mut sorted: Vec<&RankedStock> = stocks.iter().collect();
    sorted.sort_by(|a, b| {
        metric(b)
            .partial_cmp(&metric(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
        .iter()
        .take(LEADERBOARD_SIZE)
        .map(|s| s.data.symbol.clone())
        .collect()
}

/// Calculate analytics for a ranked batch.
pub fn calculate_analytics(stocks: &[RankedStock]) -> Analytics {
    if stocks.is_empty() {
        return Analytics::empty();
    }

    let count = stocks.len() as f64;
    let top: Vec<&RankedStock> = stocks.iter().filter(|s| s.is_top).collect();
    let top_avg_score = if top.is_empty() {
        0.0
    } else {
        top.iter().map(|s| s.total_score).sum::<f64>() / top.len() as f64
    };

    Analytics {
        total_stocks: stocks.len(),
        avg_score: stocks.iter().map(|s| s.total_score).sum::<f64>() / count,
        avg_confidence: stocks.iter().map(|s| s.confidence).sum::<f64>() / count,
        top_avg_score,
        earnings_safe_count: stocks.iter().filter(|s| s.earnings_safe).count(),
        trending_industries: trending_industries(stocks),
        sector_distribution: sector_distribution(stocks),
        top_movers_1w: leaderboard(stocks, |s| s.data.perf_1w),
        top_movers_1m: leaderboard(stocks, |s| s.data.perf_1m),
        top_movers_6m: leaderboard(stocks, |s| s.data.perf_6m),
        volume_leaders: leaderboard(stocks, |s| s.data.rel_volume),
        breakout_candidates: leaderboard(stocks, |s| s.data.high_52w_proximity()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScoreComponents, StockData};

    fn ranked(
        symbol: &str,
        industry: &str,
        sector: &str,
        total_score: f64,
        rank: usize,
        is_top: bool,
    ) -> RankedStock {
        RankedStock {
            data: StockData {
                symbol: symbol.to_string(),
                industry: industry.to_string(),
                sector: sector.to_string(),
                perf_1w: total_score,
                perf_1m: total_score * 2.0,
                perf_6m: total_score * 3.0,
                rel_volume: 1.0 + total_score / 100.0,
                price: total_score,
                high_52w: 100.0,
                ..StockData::default()
            },
            components: ScoreComponents {
                price_momentum: 0.0,
                volume_momentum: 0.0,
                technical_strength: 0.0,
                breakout_score: 0.0,
                stability_score: 0.0,
            },
            total_score,
            confidence: 50.0,
            rank,
            is_top,
            earnings_safe: true,
        }
    }

    #[test]
    fn test_empty_batch_yields_empty_summary() {
        let analytics = calculate_analytics(&[]);
        assert_eq!(analytics.total_stocks, 0);
        assert_eq!(analytics.avg_score, 0.0);
        assert_eq!(analytics.avg_confidence, 0.0);
        assert_eq!(analytics.top_avg_score, 0.0);
        assert_eq!(analytics.earnings_safe_count, 0);
        assert!(analytics.trending_industries.is_empty());
        assert!(analytics.sector_distribution.is_empty());
        assert!(analytics.top_movers_1w.is_empty());
        assert!(analytics.volume_leaders.is_empty());
        assert!(analytics.breakout_candidates.is_empty());
    }

    #[test]
    fn test_averages_and_counts() {
        let stocks = vec![
            ranked("A", "Software", "Technology", 80.0, 1, true),
            ranked("B", "Software", "Technology", 60.0, 2, true),
            ranked("C", "Banks", "Financials", 40.0, 3, false),
        ];
        let analytics = calculate_analytics(&stocks);

        assert_eq!(analytics.total_stocks, 3);
        assert!((analytics.avg_score - 60.0).abs() < 1e-9);
        assert!((analytics.avg_confidence - 50.0).abs() < 1e-9);
        assert!((analytics.top_avg_score - 70.0).abs() < 1e-9);
        assert_eq!(analytics.earnings_safe_count, 3);
    }

    #[test]
    fn test_no_top_stocks_means_zero_top_average() {
        let stocks = vec![ranked("A", "Software", "Technology", 80.0, 1, false)];
        let analytics = calculate_analytics(&stocks);
        assert_eq!(analytics.top_avg_score, 0.0);
    }

    #[test]
    fn test_single_member_industries_skipped() {
        let stocks = vec![
            ranked("A", "Software", "Technology", 90.0, 1, true),
            ranked("B", "Banks", "Financials", 80.0, 2, true),
            ranked("C", "Banks", "Financials", 60.0, 3, true),
        ];
        let analytics = calculate_analytics(&stocks);

        assert_eq!(analytics.trending_industries.len(), 1);
        let banks = &analytics.trending_industries[0];
        assert_eq!(banks.name, "Banks");
        assert_eq!(banks.sector, "Financials");
        assert_eq!(banks.count, 2);
        assert!((banks.avg_score - 70.0).abs() < 1e-9);
        assert_eq!(banks.top_stock, "B");
    }

    #[test]
    fn test_trending_industries_sorted_and_capped() {
        let mut stocks = Vec::new();
        let mut rank = 1;
        for (industry, score) in [
            ("I1", 10.0),
            ("I2", 20.0),
            ("I3", 30.0),
            ("I4", 40.0),
            ("I5", 50.0),
            ("I6", 60.0),
        ] {
            for member in 0..2 {
                stocks.push(ranked(
                    &format!("{}-{}", industry, member),
                    industry,
                    "S",
                    score,
                    rank,
                    false,
                ));
                rank += 1;
            }
        }
        let analytics = calculate_analytics(&stocks);

        assert_eq!(analytics.trending_industries.len(), 5);
        assert_eq!(analytics.trending_industries[0].name, "I6");
        assert!(analytics
            .trending_industries
            .windows(2)
            .all(|w| w[0].avg_score >= w[1].avg_score));
    }

    #[test]
    fn test_sector_distribution() {
        let stocks = vec![
            ranked("A", "Software", "Technology", 80.0, 1, true),
            ranked("B", "Hardware", "Technology", 60.0, 2, true),
            ranked("C", "Banks", "Financials", 40.0, 3, false),
        ];
        let analytics = calculate_analytics(&stocks);

        assert_eq!(analytics.sector_distribution["Technology"], 2);
        assert_eq!(analytics.sector_distribution["Financials"], 1);
    }

    #[test]
    fn test_leaderboards_ordered_and_capped() {
        let stocks: Vec<_> = (0..8)
            .map(|i| ranked(&format!("S{}", i), "I", "S", i as f64 * 10.0, 8 - i, false))
            .collect();
        let analytics = calculate_analytics(&stocks);

        assert_eq!(analytics.top_movers_1w.len(), 5);
        assert_eq!(analytics.top_movers_1w[0], "S7");
        assert_eq!(analytics.volume_leaders[0], "S7");
        assert_eq!(analytics.breakout_candidates[0], "S7");
    }

    #[test]
    fn test_breakout_candidates_treat_unknown_high_as_last() {
        let mut near_high = ranked("NEAR", "I", "S", 10.0, 1, false);
        near_high.data.price = 95.0;
        near_high.data.high_52w = 100.0;

        let mut no_high = ranked("NOHIGH", "I", "S", 99.0, 2, false);
        no_high.data.price = 500.0;
        no_high.data.high_52w = 0.0;

        let analytics = calculate_analytics(&[no_high, near_high]);
        assert_eq!(analytics.breakout_candidates[0], "NEAR");
    }
}
