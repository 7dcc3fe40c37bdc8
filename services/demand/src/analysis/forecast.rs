//! Forecast projector: 24-month demand projection and market summaries
//!
//! For each ranked hotspot the projector compounds the city growth rate over
//! a fixed 24-month horizon, applies a festival-season uplift, and derives
//! peak/yearly/quarterly rollups. Market trends and city rankings are pure
//! reductions over the final hotspot set.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::analysis::hotspot::Hotspot;
use crate::analysis::listing::City;
use crate::analysis::round1;

/// Fixed projection window for all hotspots.
pub const FORECAST_HORIZON_MONTHS: u32 = 24;

/// Seasonal uplift applied to Oct/Nov/Dec/Jan projections.
pub const SEASONAL_MULTIPLIER: f64 = 1.05;

/// Development priority from demand score and growth outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Combine score and growth rate: `demand_score + growth_rate * 100`.
    pub fn from_scores(demand_score: f64, growth_rate: f64) -> Self {
        let combined = demand_score + growth_rate * 100.0;
        if combined >= 95.0 {
            PriorityLevel::Critical
        } else if combined >= 80.0 {
            PriorityLevel::High
        } else if combined >= 65.0 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "CRITICAL",
            PriorityLevel::High => "HIGH",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::Low => "LOW",
        }
    }
}

/// One projected month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthProjection {
    pub month: u32,
    pub demand_score: f64,
    pub date: String,
}

/// Quarterly rollup over a 3-month window of the series.
#[derive(Debug, Clone, Serialize)]
pub struct QuarterProjection {
    pub quarter: String,
    pub avg_demand: f64,
}

/// Full 24-month projection with derived rollups.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSeries {
    pub months: Vec<MonthProjection>,
    pub peak_month: u32,
    pub peak_score: f64,
    pub year1_avg: f64,
    pub year2_avg: f64,
    pub quarterly: Vec<QuarterProjection>,
}

/// Project a base demand score forward over the 24-month horizon.
///
/// Month `m` compounds as `base * (1 + growth)^(m/12)`. The seasonal uplift
/// applies when `m % 12` lands in {10, 11, 0, 1} — the zero-indexed
/// Oct/Nov/Dec/Jan months (month 12 maps to remainder 0, i.e. December;
/// month 24 shares that remainder, so the January label is approximate over
/// two years). Every value is clamped to 100.
pub fn project_demand(base_score: f64, growth_rate: f64, as_of: DateTime<Utc>) -> ForecastSeries {
    let mut months = Vec::with_capacity(FORECAST_HORIZON_MONTHS as usize);

    for month in 1..=FORECAST_HORIZON_MONTHS {
        let projected = base_score * (1.0 + growth_rate).powf(f64::from(month) / 12.0);

        let seasonal = if matches!(month % 12, 10 | 11 | 0 | 1) {
            SEASONAL_MULTIPLIER
        } else {
            1.0
        };

        let demand_score = round1((projected * seasonal).min(100.0));
        let date = (as_of + Duration::days(i64::from(month) * 30))
            .format("%Y-%m")
            .to_string();

        months.push(MonthProjection {
            month,
            demand_score,
            date,
        });
    }

    // First occurrence wins on ties
    let mut peak = &months[0];
    for projection in &months[1..] {
        if projection.demand_score > peak.demand_score {
            peak = projection;
        }
    }
    let peak_month = peak.month;
    let peak_score = peak.demand_score;

    let year1_avg = round1(average(&months[..12]));
    let year2_avg = round1(average(&months[12..]));

    // Quarters span only the first year's four 3-month windows
    let quarter_year = (as_of + Duration::days(30)).year();
    let quarterly = (0..4usize)
        .map(|q| QuarterProjection {
            quarter: format!("Q{} {}", q + 1, quarter_year),
            avg_demand: round1(average(&months[q * 3..(q + 1) * 3])),
        })
        .collect();

    ForecastSeries {
        months,
        peak_month,
        peak_score,
        year1_avg,
        year2_avg,
        quarterly,
    }
}

fn average(months: &[MonthProjection]) -> f64 {
    months.iter().map(|m| m.demand_score).sum::<f64>() / months.len() as f64
}

/// A hotspot enriched with its forecast, as it appears in the report.
#[derive(Debug, Clone, Serialize)]
pub struct HotspotForecast {
    pub location_id: String,
    pub area: String,
    pub city: String,
    pub demand_score: f64,
    pub property_count: usize,
    pub avg_price: String,
    pub avg_area: String,
    pub price_per_sqft: String,
    pub investment_potential: String,
    pub recommendation: String,
    pub growth_rate: String,
    pub peak_demand_month: u32,
    pub peak_demand_score: f64,
    pub year1_avg_demand: f64,
    pub year2_avg_demand: f64,
    pub quarterly_forecast: Vec<QuarterProjection>,
    pub priority_level: String,
}

/// Attach the growth projection and priority to a ranked hotspot.
pub fn enrich_hotspot(hotspot: &Hotspot, as_of: DateTime<Utc>) -> HotspotForecast {
    let growth_rate = hotspot.city.annual_growth_rate();
    let series = project_demand(hotspot.demand_score, growth_rate, as_of);
    let priority = PriorityLevel::from_scores(hotspot.demand_score, growth_rate);

    HotspotForecast {
        location_id: hotspot.location_id.clone(),
        area: hotspot.area.clone(),
        city: hotspot.city.as_str().to_string(),
        demand_score: hotspot.demand_score,
        property_count: hotspot.property_count,
        avg_price: hotspot.avg_price_display(),
        avg_area: hotspot.avg_area_display(),
        price_per_sqft: hotspot.price_per_sqft_display(),
        investment_potential: hotspot.investment_tier.as_str().to_string(),
        recommendation: hotspot.recommendation.clone(),
        growth_rate: format!("{:.0}% annually", growth_rate * 100.0),
        peak_demand_month: series.peak_month,
        peak_demand_score: series.peak_score,
        year1_avg_demand: series.year1_avg,
        year2_avg_demand: series.year2_avg,
        quarterly_forecast: series.quarterly,
        priority_level: priority.as_str().to_string(),
    }
}

/// Market-wide trend summary over the final hotspot set.
#[derive(Debug, Clone, Serialize)]
pub struct MarketTrends {
    pub average_demand_score: f64,
    pub leading_cities: Vec<(String, usize)>,
    pub market_sentiment: String,
    pub growth_drivers: Vec<String>,
}

/// Reduce the hotspot set to market trends.
///
/// An empty hotspot set is a valid terminal state and yields a zero average
/// rather than a division error.
pub fn market_trends(hotspots: &[Hotspot]) -> MarketTrends {
    let average_demand_score = if hotspots.is_empty() {
        0.0
    } else {
        round1(hotspots.iter().map(|h| h.demand_score).sum::<f64>() / hotspots.len() as f64)
    };

    let mut city_counts: HashMap<&str, usize> = HashMap::new();
    for hotspot in hotspots {
        *city_counts.entry(hotspot.city.as_str()).or_default() += 1;
    }
    let mut leading_cities: Vec<(String, usize)> = city_counts
        .into_iter()
        .map(|(city, count)| (city.to_string(), count))
        .collect();
    leading_cities.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    leading_cities.truncate(3);

    let market_sentiment = if average_demand_score > 60.0 {
        "Bullish"
    } else if average_demand_score > 40.0 {
        "Moderate"
    } else {
        "Bearish"
    };

    MarketTrends {
        average_demand_score,
        leading_cities,
        market_sentiment: market_sentiment.to_string(),
        growth_drivers: vec![
            "Infrastructure development".to_string(),
            "Metro connectivity expansion".to_string(),
            "IT sector growth".to_string(),
            "Government housing policies".to_string(),
        ],
    }
}

/// Per-city ranking over the hotspot set.
#[derive(Debug, Clone, Serialize)]
pub struct CityRanking {
    pub city: String,
    pub avg_demand_score: f64,
    pub hotspot_count: usize,
    pub top_areas: Vec<String>,
}

/// Rank cities by average hotspot demand score, descending.
pub fn rank_cities(hotspots: &[Hotspot]) -> Vec<CityRanking> {
    let mut by_city: HashMap<City, (f64, usize, Vec<String>)> = HashMap::new();

    for hotspot in hotspots {
        let entry = by_city.entry(hotspot.city).or_default();
        entry.0 += hotspot.demand_score;
        entry.1 += 1;
        entry.2.push(hotspot.area.clone());
    }

    let mut rankings: Vec<CityRanking> = by_city
        .into_iter()
        .map(|(city, (total, count, mut areas))| {
            areas.truncate(3);
            CityRanking {
                city: city.title().to_string(),
                avg_demand_score: round1(total / count as f64),
                hotspot_count: count,
                top_areas: areas,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.avg_demand_score
            .partial_cmp(&a.avg_demand_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.city.cmp(&b.city))
    });

    rankings
}

/// Fixed planning recommendations, prefixed with city-specific entries when
/// those cities appear among the hotspots.
pub fn city_recommendations(hotspots: &[Hotspot]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if hotspots.iter().any(|h| h.city == City::Gurgaon) {
        recommendations.push(
            "Focus on Gurgaon - highest growth potential and infrastructure development"
                .to_string(),
        );
    }
    if hotspots.iter().any(|h| h.city == City::Faridabad) {
        recommendations.push(
            "Consider Faridabad for affordable housing projects with good connectivity"
                .to_string(),
        );
    }

    recommendations.extend(
        [
            "Prioritize areas near metro stations and major highways",
            "Target affordable housing segment (₹2-5 Cr range) for maximum demand",
            "Monitor government policy changes affecting real estate",
            "Consider properties with existing investment interest",
            "Plan phased development based on quarterly demand forecasts",
        ]
        .into_iter()
        .map(String::from),
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::hotspot::InvestmentTier;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
    }

    fn make_hotspot(location_id: &str, city: City, demand_score: f64) -> Hotspot {
        Hotspot {
            location_id: location_id.to_string(),
            area: location_id.split('_').skip(1).collect::<Vec<_>>().join("_"),
            city,
            demand_score,
            property_count: 4,
            avg_price_crore: 3.0,
            avg_area_sqft: 1200.0,
            price_per_sqft: 25_000.0,
            investment_tier: InvestmentTier::from_score(demand_score),
            recommendation: String::new(),
        }
    }

    #[test]
    fn test_series_shape() {
        let series = project_demand(60.0, 0.15, as_of());
        assert_eq!(series.months.len(), 24);
        assert!((1..=24).contains(&series.peak_month));
        for m in &series.months {
            assert!(m.demand_score <= 100.0);
        }
        assert_eq!(series.quarterly.len(), 4);
    }

    #[test]
    fn test_growth_raises_year2() {
        let series = project_demand(50.0, 0.15, as_of());
        assert!(series.year1_avg < series.year2_avg);
    }

    #[test]
    fn test_seasonal_months_uplifted() {
        let series = project_demand(40.0, 0.0, as_of());
        // Zero growth: only the seasonal multiplier moves scores
        for m in &series.months {
            let expected = if matches!(m.month % 12, 10 | 11 | 0 | 1) {
                42.0
            } else {
                40.0
            };
            assert_eq!(m.demand_score, expected, "month {}", m.month);
        }
    }

    #[test]
    fn test_projection_clamped() {
        let series = project_demand(95.0, 0.15, as_of());
        assert!(series.months.iter().all(|m| m.demand_score <= 100.0));
        assert_eq!(series.peak_score, 100.0);
    }

    #[test]
    fn test_peak_first_occurrence_on_ties() {
        // High base clamps to 100 from early on; the first clamped month wins
        let series = project_demand(100.0, 0.15, as_of());
        assert_eq!(series.peak_month, 1);
    }

    #[test]
    fn test_month_dates_format() {
        let series = project_demand(50.0, 0.10, as_of());
        assert_eq!(series.months[0].date, "2026-08");
        assert_eq!(series.months[5].date, "2027-01");
    }

    #[test]
    fn test_quarterly_windows() {
        let series = project_demand(40.0, 0.0, as_of());
        // Q4 covers months 10-12, two of which carry the seasonal uplift
        let q4 = &series.quarterly[3];
        assert_eq!(q4.avg_demand, 42.0);
        assert!(q4.quarter.starts_with("Q4 "));
    }

    #[test]
    fn test_priority_ladder() {
        assert_eq!(PriorityLevel::from_scores(85.0, 0.15), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_scores(70.0, 0.12), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_scores(55.0, 0.12), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_scores(40.0, 0.08), PriorityLevel::Low);
    }

    #[test]
    fn test_enrich_hotspot() {
        let hotspot = make_hotspot("gurgaon_sector_51", City::Gurgaon, 63.8);
        let enriched = enrich_hotspot(&hotspot, as_of());

        assert_eq!(enriched.growth_rate, "15% annually");
        assert_eq!(enriched.avg_price, "₹3.0 Cr");
        assert!(enriched.year1_avg_demand < enriched.year2_avg_demand);
        assert_eq!(enriched.quarterly_forecast.len(), 4);
        assert_eq!(enriched.priority_level, "MEDIUM");
    }

    #[test]
    fn test_market_trends() {
        let hotspots = vec![
            make_hotspot("gurgaon_sector_51", City::Gurgaon, 70.0),
            make_hotspot("gurgaon_dlf_phase_2", City::Gurgaon, 80.0),
            make_hotspot("faridabad_sector_21", City::Faridabad, 50.0),
        ];
        let trends = market_trends(&hotspots);

        assert!((trends.average_demand_score - 66.7).abs() < 1e-9);
        assert_eq!(trends.market_sentiment, "Bullish");
        assert_eq!(trends.leading_cities[0], ("gurgaon".to_string(), 2));
        assert_eq!(trends.growth_drivers.len(), 4);
    }

    #[test]
    fn test_market_trends_empty() {
        let trends = market_trends(&[]);
        assert_eq!(trends.average_demand_score, 0.0);
        assert_eq!(trends.market_sentiment, "Bearish");
        assert!(trends.leading_cities.is_empty());
    }

    #[test]
    fn test_rank_cities() {
        let hotspots = vec![
            make_hotspot("gurgaon_sector_51", City::Gurgaon, 70.0),
            make_hotspot("gurgaon_dlf_phase_2", City::Gurgaon, 80.0),
            make_hotspot("faridabad_sector_21", City::Faridabad, 90.0),
        ];
        let rankings = rank_cities(&hotspots);

        assert_eq!(rankings[0].city, "Faridabad");
        assert_eq!(rankings[0].avg_demand_score, 90.0);
        assert_eq!(rankings[1].city, "Gurgaon");
        assert_eq!(rankings[1].hotspot_count, 2);
        assert_eq!(rankings[1].top_areas.len(), 2);
    }

    #[test]
    fn test_city_recommendations() {
        let hotspots = vec![make_hotspot("gurgaon_sector_51", City::Gurgaon, 70.0)];
        let recs = city_recommendations(&hotspots);
        assert!(recs[0].contains("Gurgaon"));
        assert_eq!(recs.len(), 6);

        let none = city_recommendations(&[]);
        assert_eq!(none.len(), 5);
    }
}
