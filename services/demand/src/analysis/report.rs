//! Report assembly and output writing (JSON and Parquet)

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::analysis::forecast::{CityRanking, HotspotForecast, MarketTrends};

/// Top-level analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_summary: AnalysisSummary,
    pub demand_forecast: DemandForecast,
    pub data_quality: DataQuality,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub total_properties_analyzed: usize,
    pub valid_locations: usize,
    pub top_hotspots_identified: usize,
    pub analysis_date: String,
    pub methodology: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemandForecast {
    pub forecast_date: String,
    pub forecast_period: String,
    pub methodology: String,
    pub total_hotspots: usize,
    pub hotspots: Vec<HotspotForecast>,
    pub market_trends: MarketTrends,
    pub city_rankings: Vec<CityRanking>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQuality {
    pub houses_dataset_records: usize,
    pub cleaned_dataset_records: usize,
    pub processed_valid_records: usize,
    pub coverage: CoverageStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageStats {
    pub cities: usize,
    pub areas: usize,
}

/// Write the full report as pretty JSON.
pub fn write_report_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote analysis report to {}", path.display());
    Ok(())
}

/// Write the ranked hotspots as a flat Parquet table.
pub fn write_hotspots_parquet(path: &Path, hotspots: &[HotspotForecast]) -> Result<()> {
    if hotspots.is_empty() {
        tracing::info!("No hotspots to write");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let location_id_col: Vec<&str> = hotspots.iter().map(|h| h.location_id.as_str()).collect();
    let area_col: Vec<&str> = hotspots.iter().map(|h| h.area.as_str()).collect();
    let city_col: Vec<&str> = hotspots.iter().map(|h| h.city.as_str()).collect();
    let demand_score_col: Vec<f64> = hotspots.iter().map(|h| h.demand_score).collect();
    let property_count_col: Vec<u32> = hotspots.iter().map(|h| h.property_count as u32).collect();
    let avg_price_col: Vec<&str> = hotspots.iter().map(|h| h.avg_price.as_str()).collect();
    let avg_area_col: Vec<&str> = hotspots.iter().map(|h| h.avg_area.as_str()).collect();
    let tier_col: Vec<&str> = hotspots
        .iter()
        .map(|h| h.investment_potential.as_str())
        .collect();
    let priority_col: Vec<&str> = hotspots.iter().map(|h| h.priority_level.as_str()).collect();
    let growth_col: Vec<&str> = hotspots.iter().map(|h| h.growth_rate.as_str()).collect();
    let peak_month_col: Vec<u32> = hotspots.iter().map(|h| h.peak_demand_month).collect();
    let peak_score_col: Vec<f64> = hotspots.iter().map(|h| h.peak_demand_score).collect();
    let year1_col: Vec<f64> = hotspots.iter().map(|h| h.year1_avg_demand).collect();
    let year2_col: Vec<f64> = hotspots.iter().map(|h| h.year2_avg_demand).collect();

    let df = DataFrame::new(vec![
        Series::new("location_id", location_id_col),
        Series::new("area", area_col),
        Series::new("city", city_col),
        Series::new("demand_score", demand_score_col),
        Series::new("property_count", property_count_col),
        Series::new("avg_price", avg_price_col),
        Series::new("avg_area", avg_area_col),
        Series::new("investment_potential", tier_col),
        Series::new("priority_level", priority_col),
        Series::new("growth_rate", growth_col),
        Series::new("peak_demand_month", peak_month_col),
        Series::new("peak_demand_score", peak_score_col),
        Series::new("year1_avg_demand", year1_col),
        Series::new("year2_avg_demand", year2_col),
    ])?;

    let file = std::fs::File::create(path)?;
    ParquetWriter::new(file).finish(&mut df.clone())?;

    tracing::info!("Wrote {} hotspots to {}", hotspots.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::forecast::QuarterProjection;
    use tempfile::TempDir;

    fn make_hotspot_forecast() -> HotspotForecast {
        HotspotForecast {
            location_id: "gurgaon_sector_51".to_string(),
            area: "sector_51".to_string(),
            city: "gurgaon".to_string(),
            demand_score: 63.8,
            property_count: 3,
            avg_price: "₹3.2 Cr".to_string(),
            avg_area: "1200 sq ft".to_string(),
            price_per_sqft: "₹26389".to_string(),
            investment_potential: "Good".to_string(),
            recommendation: "MODERATE PRIORITY: Good potential - evaluate detailed feasibility"
                .to_string(),
            growth_rate: "15% annually".to_string(),
            peak_demand_month: 24,
            peak_demand_score: 88.6,
            year1_avg_demand: 67.9,
            year2_avg_demand: 79.5,
            quarterly_forecast: vec![QuarterProjection {
                quarter: "Q1 2026".to_string(),
                avg_demand: 64.9,
            }],
            priority_level: "MEDIUM".to_string(),
        }
    }

    fn make_report() -> AnalysisReport {
        AnalysisReport {
            analysis_summary: AnalysisSummary {
                total_properties_analyzed: 3,
                valid_locations: 1,
                top_hotspots_identified: 1,
                analysis_date: "2026-08-01T00:00:00+00:00".to_string(),
                methodology: "Statistical demand scoring with trend projection".to_string(),
            },
            demand_forecast: DemandForecast {
                forecast_date: "2026-08-01T00:00:00+00:00".to_string(),
                forecast_period: "24 months".to_string(),
                methodology: "Statistical analysis with trend projection".to_string(),
                total_hotspots: 1,
                hotspots: vec![make_hotspot_forecast()],
                market_trends: MarketTrends {
                    average_demand_score: 63.8,
                    leading_cities: vec![("gurgaon".to_string(), 1)],
                    market_sentiment: "Bullish".to_string(),
                    growth_drivers: vec!["Infrastructure development".to_string()],
                },
                city_rankings: vec![CityRanking {
                    city: "Gurgaon".to_string(),
                    avg_demand_score: 63.8,
                    hotspot_count: 1,
                    top_areas: vec!["sector_51".to_string()],
                }],
                recommendations: vec!["Prioritize areas near metro stations".to_string()],
            },
            data_quality: DataQuality {
                houses_dataset_records: 3,
                cleaned_dataset_records: 0,
                processed_valid_records: 3,
                coverage: CoverageStats { cities: 1, areas: 1 },
            },
        }
    }

    #[test]
    fn test_write_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/predictions.json");

        write_report_json(&path, &make_report()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["analysis_summary"]["total_properties_analyzed"], 3);
        assert_eq!(value["demand_forecast"]["forecast_period"], "24 months");
        assert_eq!(
            value["demand_forecast"]["hotspots"][0]["avg_price"],
            "₹3.2 Cr"
        );
        assert_eq!(
            value["demand_forecast"]["market_trends"]["leading_cities"][0][0],
            "gurgaon"
        );
    }

    #[test]
    fn test_write_hotspots_parquet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hotspots.parquet");

        write_hotspots_parquet(&path, &[make_hotspot_forecast()]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_empty_hotspots_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hotspots.parquet");

        write_hotspots_parquet(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
