//! Filtering and sorting of the ranked collection.
//!
//! Sort keys form a closed enumeration validated at parse time — an unknown
//! key is a client error, never a silent no-op. String keys compare
//! case-insensitively; numeric keys use the usual total order with NaN-safe
//! comparison.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RankedStock;

// ============================================================================
// Sort Key
// ============================================================================

/// The fields a ranked collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rank,
    Symbol,
    TotalScore,
    Confidence,
    PriceMomentum,
    VolumeMomentum,
    Industry,
    Price,
    MarketCap,
    Perf1w,
}

/// Error for a sort key outside the supported enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl std::str::FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(Self::Rank),
            "symbol" => Ok(Self::Symbol),
            "total_score" | "score" => Ok(Self::TotalScore),
            "confidence" => Ok(Self::Confidence),
            "price_momentum" => Ok(Self::PriceMomentum),
            "volume_momentum" => Ok(Self::VolumeMomentum),
            "industry" => Ok(Self::Industry),
            "price" => Ok(Self::Price),
            "market_cap" => Ok(Self::MarketCap),
            "perf_1w" => Ok(Self::Perf1w),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDir {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// A filter-and-sort request over a ranked collection.
#[derive(Debug, Clone, Default)]
pub struct StockQuery {
    /// Exact industry filter
    pub industry: Option<String>,
    /// Exact sector filter
    pub sector: Option<String>,
    /// Case-insensitive substring match over symbol and description
    pub search: Option<String>,
    /// Restrict to rank <= K
    pub max_rank: Option<usize>,
    /// Sort key (rank when unset)
    pub sort_by: Option<SortKey>,
    /// Sort direction
    pub sort_dir: SortDir,
}

impl StockQuery {
    /// Apply the query to a ranked collection, returning the matching
    /// stocks in the requested order.
    pub fn apply(&self, stocks: &[RankedStock]) -> Vec<RankedStock> {
        let mut filtered: Vec<RankedStock> = stocks
            .iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect();

        let key = self.sort_by.unwrap_or(SortKey::Rank);
        filtered.sort_by(|a, b| {
            let ord = compare_by(key, a, b);
            match self.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });

        filtered
    }

    fn matches(&self, stock: &RankedStock) -> bool {
        if let Some(ref industry) = self.industry {
            if !industry.is_empty() && stock.data.industry != *industry {
                return false;
            }
        }
        if let Some(ref sector) = self.sector {
            if !sector.is_empty() && stock.data.sector != *sector {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                let needle = search.to_lowercase();
                let in_symbol = stock.data.symbol.to_lowercase().contains(&needle);
                let in_description = stock.data.description.to_lowercase().contains(&needle);
                if !in_symbol && !in_description {
                    return false;
                }
            }
        }
        if let Some(max_rank) = self.max_rank {
            if stock.rank > max_rank {
                return false;
            }
        }
        true
    }
}

/// Compare two ranked stocks by the typed accessor for a sort key.
fn compare_by(key: SortKey, a: &RankedStock, b: &RankedStock) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let float_cmp = |x: f64, y: f64| x.partial_cmp(&y).unwrap_or(Ordering::Equal);

    match key {
        SortKey::Rank => a.rank.cmp(&b.rank),
        SortKey::Symbol => a
            .data
            .symbol
            .to_lowercase()
            .cmp(&b.data.symbol.to_lowercase()),
        SortKey::TotalScore => float_cmp(a.total_score, b.total_score),
        SortKey::Confidence => float_cmp(a.confidence, b.confidence),
        SortKey::PriceMomentum => float_cmp(a.components.price_momentum, b.components.price_momentum),
        SortKey::VolumeMomentum => {
            float_cmp(a.components.volume_momentum, b.components.volume_momentum)
        }
        SortKey::Industry => a
            .data
            .industry
            .to_lowercase()
            .cmp(&b.data.industry.to_lowercase()),
        SortKey::Price => float_cmp(a.data.price, b.data.price),
        SortKey::MarketCap => float_cmp(a.data.market_cap, b.data.market_cap),
        SortKey::Perf1w => float_cmp(a.data.perf_1w, b.data.perf_1w),
    }
}

// ============================================================================
// Tests
// ============================================================================
