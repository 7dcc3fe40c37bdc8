//! Core listing types for the demand pipeline

use serde::{Deserialize, Serialize};

use crate::analysis::extract::{extract_area, extract_location, extract_price};
use crate::analysis::ingest::{DatasetSource, ListingRecord};

/// City resolved from a listing address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Gurgaon,
    Faridabad,
    Delhi,
    Unknown,
}

impl Default for City {
    fn default() -> Self {
        Self::Unknown
    }
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Gurgaon => "gurgaon",
            City::Faridabad => "faridabad",
            City::Delhi => "delhi",
            City::Unknown => "unknown",
        }
    }

    /// Title-cased name for report display.
    pub fn title(&self) -> &'static str {
        match self {
            City::Gurgaon => "Gurgaon",
            City::Faridabad => "Faridabad",
            City::Delhi => "Delhi",
            City::Unknown => "Unknown",
        }
    }

    /// Assumed annual demand growth rate used by the forecast projector.
    pub fn annual_growth_rate(&self) -> f64 {
        match self {
            City::Gurgaon => 0.15,
            City::Faridabad => 0.12,
            City::Delhi => 0.08,
            City::Unknown => 0.10,
        }
    }
}

/// Typed view of one listing, derived from a raw record.
///
/// `price_crore` and `area_sqft` of 0 mean the field was absent or
/// unparseable; such listings are dropped before aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFeatures {
    pub source: DatasetSource,
    pub property_name: String,
    pub address: String,
    pub description: String,
    pub nearby: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub price_crore: f64,
    pub area_sqft: f64,
    pub city: City,
    pub area_key: String,
}

impl PropertyFeatures {
    /// Extract typed features from a raw row mapping.
    pub fn from_record(record: &ListingRecord) -> Self {
        let address = record.get("address").to_string();
        let location = extract_location(&address);

        Self {
            source: record.source,
            property_name: record.get("property_name").to_string(),
            description: record.get("description").to_string(),
            nearby: record.get("nearbyLocations").to_string(),
            bedrooms: record.get("bedRoom").to_string(),
            bathrooms: record.get("bathroom").to_string(),
            price_crore: extract_price(record.get("price")),
            area_sqft: extract_area(record.get("area")),
            city: location.city,
            area_key: location.area_key,
            address,
        }
    }

    /// Whether both numeric fields parsed to usable values.
    pub fn is_complete(&self) -> bool {
        self.price_crore > 0.0 && self.area_sqft > 0.0
    }

    /// Grouping key for location aggregation.
    pub fn location_id(&self) -> String {
        format!("{}_{}", self.city.as_str(), self.area_key)
    }
}

/// The five per-listing demand factors, each bounded to [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandFactors {
    pub price_accessibility: f64,
    pub location_desirability: f64,
    pub connectivity: f64,
    pub investment_potential: f64,
    pub amenities: f64,
}
