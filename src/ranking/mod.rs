//! Ranking and analytics module.
//!
//! Orchestrates the component scorers over a batch of stocks, assigns dense
//! ranks, attaches the confidence signal and the earnings-window safety
//! flag, and derives cross-sectional analytics from the ranked output.

pub mod analytics;
pub mod confidence;
pub mod ranker;

pub use analytics::{calculate_analytics, Analytics, IndustryStats};
pub use confidence::calculate_confidence;
pub use ranker::{rank_stocks, rank_stocks_as_of};
