//! Location aggregation: scored listings → per-area demand statistics

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::factors::weighted_score;
use crate::analysis::listing::{City, DemandFactors, PropertyFeatures};

/// Minimum listings a location needs before it is considered statistically
/// reliable. Single-listing locations never reach the hotspot stage.
pub const MIN_CLUSTER_SIZE: usize = 2;

/// Listing volume at which the density bonus saturates.
const DENSITY_SATURATION: f64 = 20.0;

/// Maximum density bonus added on top of the weighted factor score.
const DENSITY_BONUS_MAX: f64 = 10.0;

/// Running per-factor totals across a location's member listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorSums {
    pub price_accessibility: f64,
    pub location_desirability: f64,
    pub connectivity: f64,
    pub investment_potential: f64,
    pub amenities: f64,
}

impl FactorSums {
    pub fn add(&mut self, factors: &DemandFactors) {
        self.price_accessibility += factors.price_accessibility;
        self.location_desirability += factors.location_desirability;
        self.connectivity += factors.connectivity;
        self.investment_potential += factors.investment_potential;
        self.amenities += factors.amenities;
    }

    pub fn averages(&self, count: usize) -> DemandFactors {
        let n = count as f64;
        DemandFactors {
            price_accessibility: self.price_accessibility / n,
            location_desirability: self.location_desirability / n,
            connectivity: self.connectivity / n,
            investment_potential: self.investment_potential / n,
            amenities: self.amenities / n,
        }
    }
}

#[derive(Debug, Default)]
struct LocationAccumulator {
    area_key: String,
    city: City,
    count: usize,
    total_price: f64,
    total_area: f64,
    factor_sums: FactorSums,
}

/// Aggregated demand statistics for one (city, area) cluster.
#[derive(Debug, Clone, Serialize)]
pub struct LocationAggregate {
    pub location_id: String,
    pub area_key: String,
    pub city: City,
    pub property_count: usize,
    pub avg_price: f64,
    pub avg_area: f64,
    pub avg_factors: DemandFactors,
    pub demand_score: f64,
    pub price_per_sqft: f64,
}

/// Group scored listings by location and derive aggregate demand scores.
///
/// Groups below [`MIN_CLUSTER_SIZE`] are dropped. The result is sorted by
/// location id so downstream ordering is deterministic.
pub fn aggregate_locations(listings: &[(PropertyFeatures, DemandFactors)]) -> Vec<LocationAggregate> {
    let mut groups: HashMap<String, LocationAccumulator> = HashMap::new();

    for (features, factors) in listings {
        let acc = groups.entry(features.location_id()).or_default();
        acc.area_key = features.area_key.clone();
        acc.city = features.city;
        acc.count += 1;
        acc.total_price += features.price_crore;
        acc.total_area += features.area_sqft;
        acc.factor_sums.add(factors);
    }

    let mut aggregates: Vec<LocationAggregate> = groups
        .into_iter()
        .filter(|(_, acc)| acc.count >= MIN_CLUSTER_SIZE)
        .map(|(location_id, acc)| {
            let avg_price = acc.total_price / acc.count as f64;
            let avg_area = acc.total_area / acc.count as f64;
            let avg_factors = acc.factor_sums.averages(acc.count);

            let density_bonus =
                (acc.count as f64 / DENSITY_SATURATION).min(1.0) * DENSITY_BONUS_MAX;
            let demand_score = (weighted_score(&avg_factors) + density_bonus).clamp(0.0, 100.0);

            let price_per_sqft = if avg_area > 0.0 {
                avg_price * 10_000_000.0 / avg_area
            } else {
                0.0
            };

            LocationAggregate {
                location_id,
                area_key: acc.area_key,
                city: acc.city,
                property_count: acc.count,
                avg_price,
                avg_area,
                avg_factors,
                demand_score,
                price_per_sqft,
            }
        })
        .collect();

    aggregates.sort_by(|a, b| a.location_id.cmp(&b.location_id));

    tracing::info!(
        "Aggregated {} listings into {} qualifying locations",
        listings.len(),
        aggregates.len()
    );

    aggregates
}
