//! Demand factor model
//!
//! Five bounded heuristics per listing, each a pure function of the
//! listing's text fields:
//! - price_accessibility: step function of price (cheaper = more demand)
//! - location_desirability: prime-location and city keywords in the address
//! - connectivity: transit keywords in the nearby-locations text
//! - investment_potential: investment language in the description
//! - amenities: amenity keywords in the nearby-locations text
//!
//! The same weight table drives both the per-listing score used for map
//! intensity and the location-level aggregate score.

use crate::analysis::listing::{DemandFactors, PropertyFeatures};

/// Weight applied to each averaged factor when deriving a demand score.
pub const WEIGHT_PRICE_ACCESSIBILITY: f64 = 25.0;
pub const WEIGHT_LOCATION_DESIRABILITY: f64 = 20.0;
pub const WEIGHT_CONNECTIVITY: f64 = 20.0;
pub const WEIGHT_INVESTMENT_POTENTIAL: f64 = 20.0;
pub const WEIGHT_AMENITIES: f64 = 15.0;

const PRIME_LOCATIONS: [&str; 5] = ["dlf", "cyber city", "golf course", "mg road", "sushant lok"];
const CONNECTIVITY_KEYWORDS: [&str; 4] = ["metro", "airport", "highway", "expressway"];
const INVESTMENT_KEYWORDS: [&str; 3] = ["investment", "rental", "income"];
const AMENITY_KEYWORDS: [&str; 5] = ["hospital", "school", "mall", "bank", "park"];

/// Compute the five demand factors for one listing.
pub fn demand_factors(features: &PropertyFeatures) -> DemandFactors {
    let address = features.address.to_lowercase();
    let nearby = features.nearby.to_lowercase();
    let description = features.description.to_lowercase();

    let price_accessibility = if features.price_crore > 0.0 {
        if features.price_crore <= 3.0 {
            1.0
        } else if features.price_crore <= 5.0 {
            0.8
        } else if features.price_crore <= 10.0 {
            0.6
        } else {
            0.3
        }
    } else {
        0.0
    };

    let location_desirability = if PRIME_LOCATIONS.iter().any(|loc| address.contains(loc)) {
        1.0
    } else if address.contains("gurgaon") {
        0.7
    } else {
        0.5
    };

    let connectivity =
        (keyword_hits(&nearby, &CONNECTIVITY_KEYWORDS) as f64 / CONNECTIVITY_KEYWORDS.len() as f64)
            .min(1.0);

    let investment_potential = if INVESTMENT_KEYWORDS.iter().any(|kw| description.contains(kw)) {
        1.0
    } else {
        0.3
    };

    let amenities = (keyword_hits(&nearby, &AMENITY_KEYWORDS) as f64
        / AMENITY_KEYWORDS.len() as f64)
        .min(1.0);

    DemandFactors {
        price_accessibility,
        location_desirability,
        connectivity,
        investment_potential,
        amenities,
    }
}

/// Weighted sum of factors on the 0–100 demand scale.
pub fn weighted_score(factors: &DemandFactors) -> f64 {
    factors.price_accessibility * WEIGHT_PRICE_ACCESSIBILITY
        + factors.location_desirability * WEIGHT_LOCATION_DESIRABILITY
        + factors.connectivity * WEIGHT_CONNECTIVITY
        + factors.investment_potential * WEIGHT_INVESTMENT_POTENTIAL
        + factors.amenities * WEIGHT_AMENITIES
}

fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ingest::DatasetSource;
    use crate::analysis::listing::City;

    fn make_features(price: f64, address: &str, nearby: &str, description: &str) -> PropertyFeatures {
        PropertyFeatures {
            source: DatasetSource::Houses,
            property_name: String::new(),
            address: address.to_string(),
            description: description.to_string(),
            nearby: nearby.to_string(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            price_crore: price,
            area_sqft: 1000.0,
            city: City::Gurgaon,
            area_key: "sector_51".to_string(),
        }
    }

    #[test]
    fn test_price_accessibility_steps() {
        let f = |price| make_features(price, "", "", "");
        assert_eq!(demand_factors(&f(2.0)).price_accessibility, 1.0);
        assert_eq!(demand_factors(&f(3.0)).price_accessibility, 1.0);
        assert_eq!(demand_factors(&f(4.5)).price_accessibility, 0.8);
        assert_eq!(demand_factors(&f(8.0)).price_accessibility, 0.6);
        assert_eq!(demand_factors(&f(15.0)).price_accessibility, 0.3);
        assert_eq!(demand_factors(&f(0.0)).price_accessibility, 0.0);
    }

    #[test]
    fn test_location_desirability() {
        let prime = make_features(2.0, "DLF Cyber City, Gurgaon", "", "");
        assert_eq!(demand_factors(&prime).location_desirability, 1.0);

        let city = make_features(2.0, "Sector 9, Gurgaon", "", "");
        assert_eq!(demand_factors(&city).location_desirability, 0.7);

        let other = make_features(2.0, "Sector 12, Faridabad", "", "");
        assert_eq!(demand_factors(&other).location_desirability, 0.5);
    }

    #[test]
    fn test_connectivity_counts_keywords() {
        let f = make_features(2.0, "", "metro station, close to highway", "");
        assert_eq!(demand_factors(&f).connectivity, 0.5);

        let all = make_features(2.0, "", "metro, airport, highway, expressway", "");
        assert_eq!(demand_factors(&all).connectivity, 1.0);

        let none = make_features(2.0, "", "quiet residential lane", "");
        assert_eq!(demand_factors(&none).connectivity, 0.0);
    }

    #[test]
    fn test_investment_potential() {
        let yes = make_features(2.0, "", "", "strong rental income");
        assert_eq!(demand_factors(&yes).investment_potential, 1.0);

        let no = make_features(2.0, "", "", "cozy family home");
        assert_eq!(demand_factors(&no).investment_potential, 0.3);
    }

    #[test]
    fn test_amenities_counts_keywords() {
        let f = make_features(2.0, "", "school, mall and park nearby", "");
        assert_eq!(demand_factors(&f).amenities, 0.6);
    }

    #[test]
    fn test_all_factors_bounded() {
        let f = make_features(
            1.0,
            "DLF Phase 1 Gurgaon golf course mg road sushant lok",
            "metro metro airport highway expressway hospital school mall bank park",
            "investment rental income",
        );
        let factors = demand_factors(&f);
        for value in [
            factors.price_accessibility,
            factors.location_desirability,
            factors.connectivity,
            factors.investment_potential,
            factors.amenities,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(weighted_score(&factors), 100.0);
    }
}
