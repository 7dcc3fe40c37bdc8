//! Geographic mapping: approximate coordinates and map-layer data
//!
//! Coordinates are lookup-table approximations with a small jitter so
//! listings in the same area do not stack on one marker. The jitter source
//! is seedable, keeping map output reproducible in tests. This layer reuses
//! the same factor weights as the demand engine for per-listing scores.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::analysis::factors::{demand_factors, weighted_score};
use crate::analysis::listing::{City, PropertyFeatures};
use crate::analysis::round1;

/// Approximate coordinates for major NCR areas.
pub const AREA_COORDINATES: &[(&str, (f64, f64))] = &[
    // Gurgaon sectors
    ("sector_17a", (28.4734, 77.0261)),
    ("sector_21a", (28.4501, 77.0648)),
    ("sector_51", (28.4418, 77.0685)),
    ("sector_54", (28.4403, 77.0889)),
    ("sector_66", (28.3899, 77.0648)),
    ("sector_70a", (28.3953, 77.0648)),
    ("sector_109", (28.4089, 77.0648)),
    // DLF phases
    ("dlf_phase_1", (28.4595, 77.0266)),
    ("dlf_phase_2", (28.4692, 77.0266)),
    ("dlf_phase_3", (28.4595, 77.0390)),
    ("dlf_phase_4", (28.4494, 77.0266)),
    ("dlf_phase_5", (28.4329, 77.0266)),
    // Sushant Lok
    ("sushant_lok", (28.4595, 77.0461)),
    // Other landmarks
    ("golf_course_road", (28.4316, 77.0266)),
    ("mg_road", (28.4618, 77.0312)),
    ("cyber_city", (28.4890, 77.0905)),
    ("udyog_vihar", (28.4871, 77.0737)),
    ("iffco_chowk", (28.5245, 77.0648)),
    // City centers
    ("faridabad", (28.4089, 77.3178)),
    ("delhi", (28.7041, 77.1025)),
    ("gurgaon", (28.4595, 77.0266)),
    ("gurugram", (28.4595, 77.0266)),
];

/// Fallback center when nothing matches (Gurgaon).
const DEFAULT_CENTER: (f64, f64) = (28.4595, 77.0266);

fn base_coordinates(key: &str) -> Option<(f64, f64)> {
    AREA_COORDINATES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coords)| *coords)
}

/// Assigns jittered coordinates to listings from a seeded random source.
pub struct GeoMapper {
    rng: fastrand::Rng,
}

impl GeoMapper {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn jitter(&mut self, radius: f64) -> f64 {
        (self.rng.f64() * 2.0 - 1.0) * radius
    }

    /// Estimate coordinates for a listing.
    ///
    /// Resolution order: exact area key (±0.01), sector parsed from the
    /// address (±0.005), city center (±0.02), then the default center
    /// (±0.03). Wider jitter reflects lower placement confidence.
    pub fn coordinates(&mut self, address: &str, area_key: &str, city: City) -> (f64, f64) {
        if let Some((lat, lng)) = base_coordinates(area_key) {
            return (lat + self.jitter(0.01), lng + self.jitter(0.01));
        }

        if let Ok(re) = Regex::new(r"sector\s*(\d+[a-z]*)") {
            if let Some(caps) = re.captures(&address.to_lowercase()) {
                if let Some(m) = caps.get(1) {
                    let sector_key = format!("sector_{}", m.as_str());
                    if let Some((lat, lng)) = base_coordinates(&sector_key) {
                        return (lat + self.jitter(0.005), lng + self.jitter(0.005));
                    }
                }
            }
        }

        if let Some((lat, lng)) = base_coordinates(city.as_str()) {
            return (lat + self.jitter(0.02), lng + self.jitter(0.02));
        }

        let (lat, lng) = DEFAULT_CENTER;
        (lat + self.jitter(0.03), lng + self.jitter(0.03))
    }
}

/// One listing placed on the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapProperty {
    pub id: String,
    pub name: String,
    pub address: String,
    pub area: String,
    pub city: String,
    pub price_crore: f64,
    pub area_sqft: f64,
    pub bedrooms: String,
    pub bathrooms: String,
    pub latitude: f64,
    pub longitude: f64,
    pub demand_score: f64,
}

/// Aggregated map hotspot for the heat layer.
#[derive(Debug, Clone, Serialize)]
pub struct MapHotspot {
    pub id: String,
    pub area: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub demand_score: f64,
    pub intensity: f64,
    pub property_count: usize,
    pub avg_price: f64,
    pub price_range: PriceRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapViewConfig {
    pub center: MapCenter,
    pub bounds: MapBounds,
    pub default_zoom: u8,
    pub max_zoom: u8,
    pub min_zoom: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMetadata {
    pub generated_at: String,
    pub total_properties: usize,
    pub total_hotspots: usize,
    pub data_sources: Vec<String>,
    pub coverage_area: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapStatistics {
    pub avg_demand_score: f64,
    pub max_demand_score: f64,
    pub min_demand_score: f64,
    pub avg_price: f64,
    pub areas_covered: usize,
    pub cities_covered: usize,
}

/// Complete map payload.
#[derive(Debug, Clone, Serialize)]
pub struct MapData {
    pub metadata: MapMetadata,
    pub map_config: MapViewConfig,
    pub properties: Vec<MapProperty>,
    pub hotspots: Vec<MapHotspot>,
    pub heatmap_data: Vec<[f64; 3]>,
    pub statistics: MapStatistics,
}

/// Place every complete listing on the map with its demand score.
pub fn build_properties(features: &[PropertyFeatures], mapper: &mut GeoMapper) -> Vec<MapProperty> {
    features
        .iter()
        .enumerate()
        .map(|(index, f)| {
            let (latitude, longitude) = mapper.coordinates(&f.address, &f.area_key, f.city);
            let score = weighted_score(&demand_factors(f));

            MapProperty {
                id: format!("{}_{}", f.source.as_str(), index),
                name: if f.property_name.is_empty() {
                    "Unknown Property".to_string()
                } else {
                    f.property_name.clone()
                },
                address: f.address.clone(),
                area: f.area_key.clone(),
                city: f.city.as_str().to_string(),
                price_crore: round1(f.price_crore),
                area_sqft: f.area_sqft,
                bedrooms: f.bedrooms.clone(),
                bathrooms: f.bathrooms.clone(),
                latitude,
                longitude,
                demand_score: round1(score),
            }
        })
        .collect()
}

/// Aggregate placed listings into map hotspots (two-listing minimum).
pub fn build_hotspots(properties: &[MapProperty]) -> Vec<MapHotspot> {
    use std::collections::HashMap;

    struct Group {
        area: String,
        city: String,
        total_demand: f64,
        total_lat: f64,
        total_lng: f64,
        prices: Vec<f64>,
    }

    let mut groups: HashMap<String, Group> = HashMap::new();
    for prop in properties {
        let key = format!("{}_{}", prop.city, prop.area);
        let group = groups.entry(key).or_insert_with(|| Group {
            area: prop.area.clone(),
            city: prop.city.clone(),
            total_demand: 0.0,
            total_lat: 0.0,
            total_lng: 0.0,
            prices: Vec::new(),
        });
        group.total_demand += prop.demand_score;
        group.total_lat += prop.latitude;
        group.total_lng += prop.longitude;
        group.prices.push(prop.price_crore);
    }

    let mut hotspots: Vec<MapHotspot> = groups
        .into_iter()
        .filter(|(_, g)| g.prices.len() >= 2)
        .map(|(id, g)| {
            let count = g.prices.len();
            let avg_demand = g.total_demand / count as f64;
            let min_price = g.prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_price = g.prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            MapHotspot {
                id,
                area: g.area,
                city: g.city,
                latitude: g.total_lat / count as f64,
                longitude: g.total_lng / count as f64,
                demand_score: round1(avg_demand),
                intensity: (avg_demand / 100.0).min(1.0),
                property_count: count,
                avg_price: round1(g.prices.iter().sum::<f64>() / count as f64),
                price_range: PriceRange {
                    min: round1(min_price),
                    max: round1(max_price),
                },
            }
        })
        .collect();

    hotspots.sort_by(|a, b| {
        b.demand_score
            .partial_cmp(&a.demand_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    hotspots
}

/// Heatmap triples: `[latitude, longitude, intensity]` per listing.
pub fn heatmap_points(properties: &[MapProperty]) -> Vec<[f64; 3]> {
    properties
        .iter()
        .map(|p| [p.latitude, p.longitude, p.demand_score / 100.0])
        .collect()
}

/// Assemble the complete map payload.
pub fn build_map_data(
    features: &[PropertyFeatures],
    mapper: &mut GeoMapper,
    as_of: DateTime<Utc>,
) -> MapData {
    let properties = build_properties(features, mapper);
    let hotspots = build_hotspots(&properties);
    let heatmap_data = heatmap_points(&properties);

    let (bounds, center) = if properties.is_empty() {
        (
            MapBounds {
                north: 28.5,
                south: 28.4,
                east: 77.1,
                west: 77.0,
            },
            MapCenter {
                latitude: DEFAULT_CENTER.0,
                longitude: DEFAULT_CENTER.1,
            },
        )
    } else {
        let lats: Vec<f64> = properties.iter().map(|p| p.latitude).collect();
        let lngs: Vec<f64> = properties.iter().map(|p| p.longitude).collect();
        (
            MapBounds {
                north: lats.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                south: lats.iter().cloned().fold(f64::INFINITY, f64::min),
                east: lngs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                west: lngs.iter().cloned().fold(f64::INFINITY, f64::min),
            },
            MapCenter {
                latitude: lats.iter().sum::<f64>() / lats.len() as f64,
                longitude: lngs.iter().sum::<f64>() / lngs.len() as f64,
            },
        )
    };

    let statistics = if properties.is_empty() {
        MapStatistics {
            avg_demand_score: 0.0,
            max_demand_score: 0.0,
            min_demand_score: 0.0,
            avg_price: 0.0,
            areas_covered: 0,
            cities_covered: 0,
        }
    } else {
        let scores: Vec<f64> = properties.iter().map(|p| p.demand_score).collect();
        let areas: std::collections::HashSet<&str> =
            properties.iter().map(|p| p.area.as_str()).collect();
        let cities: std::collections::HashSet<&str> =
            properties.iter().map(|p| p.city.as_str()).collect();
        MapStatistics {
            avg_demand_score: round1(scores.iter().sum::<f64>() / scores.len() as f64),
            max_demand_score: scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            min_demand_score: scores.iter().cloned().fold(f64::INFINITY, f64::min),
            avg_price: round1(
                properties.iter().map(|p| p.price_crore).sum::<f64>() / properties.len() as f64,
            ),
            areas_covered: areas.len(),
            cities_covered: cities.len(),
        }
    };

    MapData {
        metadata: MapMetadata {
            generated_at: as_of.to_rfc3339(),
            total_properties: properties.len(),
            total_hotspots: hotspots.len(),
            data_sources: vec!["houses.csv".to_string(), "house_cleaned.csv".to_string()],
            coverage_area: "NCR Region (Gurgaon, Faridabad, Delhi)".to_string(),
        },
        map_config: MapViewConfig {
            center,
            bounds,
            default_zoom: 11,
            max_zoom: 16,
            min_zoom: 9,
        },
        properties,
        hotspots,
        heatmap_data,
        statistics,
    }
}
