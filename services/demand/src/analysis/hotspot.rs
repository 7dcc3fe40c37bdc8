//! Hotspot ranking and qualitative labeling

use serde::Serialize;

use crate::analysis::aggregate::LocationAggregate;
use crate::analysis::listing::City;
use crate::analysis::round1;

/// Default number of hotspots reported per run.
pub const DEFAULT_TOP_K: usize = 15;

/// Investment tier classification by aggregate demand score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvestmentTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl InvestmentTier {
    pub fn from_score(demand_score: f64) -> Self {
        if demand_score >= 80.0 {
            InvestmentTier::Excellent
        } else if demand_score >= 65.0 {
            InvestmentTier::VeryGood
        } else if demand_score >= 50.0 {
            InvestmentTier::Good
        } else if demand_score >= 35.0 {
            InvestmentTier::Fair
        } else {
            InvestmentTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentTier::Excellent => "Excellent",
            InvestmentTier::VeryGood => "Very Good",
            InvestmentTier::Good => "Good",
            InvestmentTier::Fair => "Fair",
            InvestmentTier::Poor => "Poor",
        }
    }
}

/// Planning recommendation for a location.
///
/// Intentionally a separate ladder from [`InvestmentTier`]: it uses strict
/// comparisons on the same boundaries and folds in listing volume, so the
/// two classifications can disagree at exact boundary scores.
pub fn recommendation(demand_score: f64, property_count: usize) -> &'static str {
    if demand_score > 80.0 {
        "IMMEDIATE ACTION: High-priority area for affordable housing development"
    } else if demand_score > 65.0 {
        "HIGH PRIORITY: Strong demand indicators - plan development within 6 months"
    } else if demand_score > 50.0 {
        "MODERATE PRIORITY: Good potential - evaluate detailed feasibility"
    } else if demand_score > 35.0 || property_count >= 10 {
        "LOW PRIORITY: Monitor market trends before major investment"
    } else {
        "AVOID: Low demand indicators - consider alternative locations"
    }
}

/// A ranked location cluster selected for forecasting.
#[derive(Debug, Clone, Serialize)]
pub struct Hotspot {
    pub location_id: String,
    pub area: String,
    pub city: City,
    pub demand_score: f64,
    pub property_count: usize,
    pub avg_price_crore: f64,
    pub avg_area_sqft: f64,
    pub price_per_sqft: f64,
    pub investment_tier: InvestmentTier,
    pub recommendation: String,
}

impl Hotspot {
    /// Display string for the average price, e.g. `"₹3.2 Cr"`.
    pub fn avg_price_display(&self) -> String {
        format!("₹{:.1} Cr", self.avg_price_crore)
    }

    /// Display string for the average area, e.g. `"1200 sq ft"`.
    pub fn avg_area_display(&self) -> String {
        format!("{:.0} sq ft", self.avg_area_sqft)
    }

    /// Display string for price per square foot, e.g. `"₹26667"`.
    pub fn price_per_sqft_display(&self) -> String {
        format!("₹{:.0}", self.price_per_sqft)
    }
}

/// Rank aggregates by demand score and keep the top `top_k`.
///
/// Ties are broken by location id ascending so ranking is deterministic
/// regardless of grouping order.
pub fn rank_hotspots(aggregates: &[LocationAggregate], top_k: usize) -> Vec<Hotspot> {
    let mut sorted: Vec<&LocationAggregate> = aggregates.iter().collect();
    sorted.sort_by(|a, b| {
        b.demand_score
            .partial_cmp(&a.demand_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.location_id.cmp(&b.location_id))
    });

    sorted
        .into_iter()
        .take(top_k)
        .map(|agg| Hotspot {
            location_id: agg.location_id.clone(),
            area: agg.area_key.clone(),
            city: agg.city,
            demand_score: round1(agg.demand_score),
            property_count: agg.property_count,
            avg_price_crore: agg.avg_price,
            avg_area_sqft: agg.avg_area,
            price_per_sqft: agg.price_per_sqft,
            investment_tier: InvestmentTier::from_score(agg.demand_score),
            recommendation: recommendation(agg.demand_score, agg.property_count).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::listing::DemandFactors;

    fn make_aggregate(location_id: &str, demand_score: f64, count: usize) -> LocationAggregate {
        LocationAggregate {
            location_id: location_id.to_string(),
            area_key: location_id.split('_').skip(1).collect::<Vec<_>>().join("_"),
            city: City::Gurgaon,
            property_count: count,
            avg_price: 3.0,
            avg_area: 1200.0,
            avg_factors: DemandFactors::default(),
            demand_score,
            price_per_sqft: 25_000.0,
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(InvestmentTier::from_score(85.0), InvestmentTier::Excellent);
        assert_eq!(InvestmentTier::from_score(80.0), InvestmentTier::Excellent);
        assert_eq!(InvestmentTier::from_score(70.0), InvestmentTier::VeryGood);
        assert_eq!(InvestmentTier::from_score(55.0), InvestmentTier::Good);
        assert_eq!(InvestmentTier::from_score(40.0), InvestmentTier::Fair);
        assert_eq!(InvestmentTier::from_score(10.0), InvestmentTier::Poor);
    }

    #[test]
    fn test_recommendation_ladder() {
        assert!(recommendation(90.0, 5).starts_with("IMMEDIATE ACTION"));
        assert!(recommendation(70.0, 5).starts_with("HIGH PRIORITY"));
        assert!(recommendation(55.0, 5).starts_with("MODERATE PRIORITY"));
        assert!(recommendation(40.0, 5).starts_with("LOW PRIORITY"));
        assert!(recommendation(20.0, 2).starts_with("AVOID"));
        // High listing volume keeps a weak area on the watch list
        assert!(recommendation(20.0, 12).starts_with("LOW PRIORITY"));
    }

    #[test]
    fn test_ladders_disagree_at_boundary() {
        // At exactly 80 the tier is Excellent but the recommendation is not
        // the top band; the two classifications are independent.
        assert_eq!(InvestmentTier::from_score(80.0), InvestmentTier::Excellent);
        assert!(recommendation(80.0, 5).starts_with("HIGH PRIORITY"));
    }

    #[test]
    fn test_ranking_order_and_truncation() {
        let aggregates = vec![
            make_aggregate("gurgaon_sector_51", 70.0, 4),
            make_aggregate("gurgaon_dlf_phase_2", 85.0, 6),
            make_aggregate("faridabad_sector_21a", 55.0, 3),
            make_aggregate("delhi_unknown", 40.0, 2),
        ];

        let hotspots = rank_hotspots(&aggregates, 3);
        assert_eq!(hotspots.len(), 3);
        assert_eq!(hotspots[0].location_id, "gurgaon_dlf_phase_2");
        for pair in hotspots.windows(2) {
            assert!(pair[0].demand_score >= pair[1].demand_score);
        }
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let aggregates = vec![
            make_aggregate("gurgaon_sector_54", 60.0, 2),
            make_aggregate("gurgaon_sector_14", 60.0, 2),
        ];
        let hotspots = rank_hotspots(&aggregates, 2);
        assert_eq!(hotspots[0].location_id, "gurgaon_sector_14");
        assert_eq!(hotspots[1].location_id, "gurgaon_sector_54");
    }

    #[test]
    fn test_display_formats() {
        let aggregates = vec![
            make_aggregate("gurgaon_sector_51", 70.0, 4),
            make_aggregate("gurgaon_sector_52", 60.0, 2),
        ];
        let hotspots = rank_hotspots(&aggregates, 2);
        assert_eq!(hotspots[0].avg_price_display(), "₹3.0 Cr");
        assert_eq!(hotspots[0].avg_area_display(), "1200 sq ft");
        assert_eq!(hotspots[0].price_per_sqft_display(), "₹25000");
    }
}
