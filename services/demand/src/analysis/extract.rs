//! Field extractors: noisy listing text → typed numeric and location values
//!
//! All extractors degrade to 0 / "unknown" on malformed input. A bad field
//! never aborts the run; incomplete listings are filtered out later by the
//! price/area completeness check.

use regex::Regex;

use crate::analysis::listing::City;

/// Extract a price in crore from free text.
///
/// Handles "2.5 Crore", "250 Lakh" (100 lakh = 1 crore) and bare numbers.
/// Bare values over 100 are assumed to be lakh-denominated — realistic crore
/// prices sit well below that, while lakh figures and raw rupee-lakh exports
/// routinely exceed it.
pub fn extract_price(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let price = text.to_lowercase().replace(',', "");

    if price.contains("crore") {
        if let Ok(re) = Regex::new(r"([\d.]+)\s*crore") {
            if let Some(caps) = re.captures(&price) {
                if let Some(m) = caps.get(1) {
                    if let Ok(v) = m.as_str().parse::<f64>() {
                        return v;
                    }
                }
            }
        }
    } else if price.contains("lakh") {
        if let Ok(re) = Regex::new(r"([\d.]+)\s*lakh") {
            if let Some(caps) = re.captures(&price) {
                if let Some(m) = caps.get(1) {
                    if let Ok(v) = m.as_str().parse::<f64>() {
                        return v / 100.0;
                    }
                }
            }
        }
    } else if let Ok(re) = Regex::new(r"[\d.]+") {
        if let Some(m) = re.find(&price) {
            if let Ok(v) = m.as_str().parse::<f64>() {
                if v > 100.0 {
                    return v / 100.0;
                }
                return v;
            }
        }
    }

    0.0
}

/// Extract an area in square feet from free text.
///
/// "sq.m"/"sq m" values convert at 10.764 sqft per sqm, "yard" at 9 sqft
/// per square yard; anything else is assumed to already be square feet.
pub fn extract_area(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let area = text.to_lowercase();

    if let Ok(re) = Regex::new(r"([\d.]+)") {
        if let Some(caps) = re.captures(&area) {
            if let Some(m) = caps.get(1) {
                if let Ok(v) = m.as_str().parse::<f64>() {
                    if area.contains("sq.m") || area.contains("sq m") {
                        return v * 10.764;
                    }
                    if area.contains("yard") {
                        return v * 9.0;
                    }
                    return v;
                }
            }
        }
    }

    0.0
}

/// Location resolved from a listing address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub city: City,
    pub area_key: String,
}

impl LocationInfo {
    fn unknown() -> Self {
        Self {
            city: City::Unknown,
            area_key: "unknown".to_string(),
        }
    }
}

/// Resolve city and area key from an address.
///
/// City checks run in a fixed priority order (gurgaon/gurugram, faridabad,
/// delhi) so an address naming several cities resolves deterministically.
/// Area checks put DLF and Sushant Lok ahead of the generic sector match —
/// those addresses often carry a sector number as well.
pub fn extract_location(address: &str) -> LocationInfo {
    if address.is_empty() {
        return LocationInfo::unknown();
    }

    let addr = address.to_lowercase();

    let city = if addr.contains("gurgaon") || addr.contains("gurugram") {
        City::Gurgaon
    } else if addr.contains("faridabad") {
        City::Faridabad
    } else if addr.contains("delhi") {
        City::Delhi
    } else {
        City::Unknown
    };

    let area_key = if addr.contains("dlf") {
        match capture_group(&addr, r"phase\s*(\d+)") {
            Some(phase) => format!("dlf_phase_{}", phase),
            None => "dlf".to_string(),
        }
    } else if addr.contains("sushant lok") {
        "sushant_lok".to_string()
    } else if let Some(sector) = capture_group(&addr, r"sector\s*(\d+[a-z]*)") {
        format!("sector_{}", sector)
    } else {
        "unknown".to_string()
    };

    LocationInfo { city, area_key }
}

fn capture_group(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}
