//! Analysis engine entry point
//!
//! One call runs the whole pipeline: raw records → extracted features →
//! per-listing factors → location aggregates → ranked hotspots → 24-month
//! forecast. The engine is a pure function of its input — it holds no state
//! between invocations, and every timestamp comes from the caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::analysis::aggregate::aggregate_locations;
use crate::analysis::factors::demand_factors;
use crate::analysis::forecast::{city_recommendations, enrich_hotspot, market_trends, rank_cities};
use crate::analysis::hotspot::{rank_hotspots, DEFAULT_TOP_K};
use crate::analysis::ingest::ListingRecord;
use crate::analysis::listing::{DemandFactors, PropertyFeatures};
use crate::analysis::report::{
    AnalysisReport, AnalysisSummary, CoverageStats, DataQuality, DemandForecast,
};

/// The full input collection for one analysis run.
#[derive(Debug, Default)]
pub struct AnalysisInput {
    pub houses: Vec<ListingRecord>,
    pub cleaned: Vec<ListingRecord>,
}

/// Per-run options.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub top_k: usize,
    pub as_of: DateTime<Utc>,
}

impl AnalysisOptions {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            as_of,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Extract and score every record, keeping only complete listings.
pub fn process_records(input: &AnalysisInput) -> Vec<(PropertyFeatures, DemandFactors)> {
    let total = input.houses.len() + input.cleaned.len();

    let listings: Vec<(PropertyFeatures, DemandFactors)> = input
        .houses
        .iter()
        .chain(input.cleaned.iter())
        .map(PropertyFeatures::from_record)
        .filter(PropertyFeatures::is_complete)
        .map(|features| {
            let factors = demand_factors(&features);
            (features, factors)
        })
        .collect();

    tracing::info!(
        "Processed {} valid listings out of {} records",
        listings.len(),
        total
    );

    listings
}

/// Run the full analysis over an input collection.
pub fn run_analysis(input: &AnalysisInput, options: &AnalysisOptions) -> AnalysisReport {
    let listings = process_records(input);
    let aggregates = aggregate_locations(&listings);
    let hotspots = rank_hotspots(&aggregates, options.top_k);

    tracing::info!(
        "Identified {} hotspots from {} qualifying locations",
        hotspots.len(),
        aggregates.len()
    );

    let enriched: Vec<_> = hotspots
        .iter()
        .map(|hotspot| enrich_hotspot(hotspot, options.as_of))
        .collect();

    let trends = market_trends(&hotspots);
    let rankings = rank_cities(&hotspots);
    let recommendations = city_recommendations(&hotspots);

    let cities: HashSet<&str> = listings.iter().map(|(f, _)| f.city.as_str()).collect();
    let areas: HashSet<&str> = listings.iter().map(|(f, _)| f.area_key.as_str()).collect();

    let as_of_text = options.as_of.to_rfc3339();

    AnalysisReport {
        analysis_summary: AnalysisSummary {
            total_properties_analyzed: listings.len(),
            valid_locations: aggregates.len(),
            top_hotspots_identified: hotspots.len(),
            analysis_date: as_of_text.clone(),
            methodology: "Statistical demand scoring with trend projection".to_string(),
        },
        demand_forecast: DemandForecast {
            forecast_date: as_of_text,
            forecast_period: "24 months".to_string(),
            methodology: "Statistical analysis with trend projection".to_string(),
            total_hotspots: enriched.len(),
            hotspots: enriched,
            market_trends: trends,
            city_rankings: rankings,
            recommendations,
        },
        data_quality: DataQuality {
            houses_dataset_records: input.houses.len(),
            cleaned_dataset_records: input.cleaned.len(),
            processed_valid_records: listings.len(),
            coverage: CoverageStats {
                cities: cities.len(),
                areas: areas.len(),
            },
        },
    }
}
