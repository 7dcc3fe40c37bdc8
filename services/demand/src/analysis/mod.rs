//! Demand analysis pipeline
//!
//! This module implements the scoring engine:
//! 1. Ingesting raw listing rows from the source datasets
//! 2. Extracting typed price/area/location features from noisy text
//! 3. Scoring each listing on five bounded demand factors
//! 4. Aggregating listings into per-location demand clusters
//! 5. Ranking hotspots and projecting demand over a 24-month horizon

pub mod aggregate;
pub mod engine;
pub mod extract;
pub mod factors;
pub mod forecast;
pub mod hotspot;
pub mod ingest;
pub mod listing;
pub mod report;

pub use aggregate::*;
pub use engine::*;
pub use extract::*;
pub use factors::*;
pub use forecast::*;
pub use hotspot::*;
pub use ingest::*;
pub use listing::*;
pub use report::*;

/// Round to one decimal for display-scale scores and averages.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
