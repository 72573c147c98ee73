//! Stock ranking.
//!
//! Scores every stock in a batch, sorts by composite score descending, and
//! assigns 1-based dense ranks. The sort is stable, so equal scores keep
//! their original input order and still receive distinct consecutive ranks.

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::models::{RankedStock, StockData};
use crate::scoring::{calculate_components, calculate_total_score};

use super::confidence::calculate_confidence;

/// Whether the stock is outside the earnings exclusion window.
///
/// Both upcoming and just-passed earnings dates within the window flag the
/// stock as unsafe; no earnings date on record is always safe.
fn is_earnings_safe(stock: &StockData, today: NaiveDate, exclusion_days: i64) -> bool {
    match stock.earnings_date {
        None => true,
        Some(earnings) => (earnings - today).num_days().abs() > exclusion_days,
    }
}

/// Score and rank a batch of stocks, evaluating earnings safety against the
/// given date.
///
/// No ordering of the input is assumed; the output is ordered rank-ascending
/// (score-descending). Ranking an empty batch yields an empty batch.
pub fn rank_stocks_as_of(
    stocks: &[StockData],
    settings: &Settings,
    today: NaiveDate,
) -> Vec<RankedStock> {
    // Score every stock; each row is independent of the others
    let mut scored: Vec<_> = stocks
        .iter()
        .map(|stock| {
            let components = calculate_components(stock, settings);
            let total = calculate_total_score(&components, settings);
            (stock, components, total)
        })
        .collect();

    // Stable sort: ties keep input order and get distinct ranks
    scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (stock, components, total))| {
            let rank = idx + 1;
            RankedStock {
                confidence: calculate_confidence(stock, Some(&components)),
                earnings_safe: is_earnings_safe(stock, today, settings.earnings_exclusion_days),
                data: stock.clone(),
                components,
                total_score: total,
                rank,
                is_top: rank <= settings.top_stocks_count,
            }
        })
        .collect()
}

/// Score and rank a batch of stocks as of today.
pub fn rank_stocks(stocks: &[StockData], settings: &Settings) -> Vec<RankedStock> {
    rank_stocks_as_of(stocks, settings, Local::now().date_naive())
}
