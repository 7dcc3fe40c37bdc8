//! Housing demand map-data CLI
//!
//! Generates the JSON payload for the map layer: jittered property markers,
//! aggregated demand hotspots, heatmap points, and view configuration.
//!
//! Usage:
//!   demand_map
//!   demand_map --seed 42 --out /tmp/map_data.json

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

use demand::analysis::{
    generate_mock_listings, load_dataset_or_empty, process_records, AnalysisInput, DatasetSource,
};
use demand::config::Config;
use demand::geo::{build_map_data, GeoMapper};

#[derive(Parser)]
#[command(name = "demand_map")]
#[command(about = "Generate housing demand map data")]
struct Cli {
    #[arg(long, default_value = "config/demand.toml")]
    config: String,
    /// Override the configured jitter seed
    #[arg(long)]
    seed: Option<u64>,
    /// Use generated listings instead of the configured datasets
    #[arg(long)]
    mock: bool,
    /// Override the configured map output path
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    };

    let input = if cli.mock {
        AnalysisInput {
            houses: generate_mock_listings(60, 1),
            cleaned: Vec::new(),
        }
    } else {
        AnalysisInput {
            houses: load_dataset_or_empty(&config.houses_path(), DatasetSource::Houses),
            cleaned: load_dataset_or_empty(&config.cleaned_path(), DatasetSource::Cleaned),
        }
    };

    let features: Vec<_> = process_records(&input)
        .into_iter()
        .map(|(features, _)| features)
        .collect();

    let seed = cli.seed.unwrap_or(config.geo.jitter_seed);
    let mut mapper = GeoMapper::new(seed);
    let map_data = build_map_data(&features, &mut mapper, Utc::now());

    let out_path = cli
        .out
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.output.map_file));

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&out_path, serde_json::to_string_pretty(&map_data)?)?;
    tracing::info!("Wrote map data to {}", out_path.display());

    println!("\n=== Mapping Summary ===");
    println!("Properties placed: {}", map_data.metadata.total_properties);
    println!("Demand hotspots: {}", map_data.metadata.total_hotspots);
    println!(
        "Coverage: {} areas in {} cities",
        map_data.statistics.areas_covered, map_data.statistics.cities_covered
    );

    println!("\n=== Top 5 Map Hotspots ===");
    for (i, hotspot) in map_data.hotspots.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, hotspot.area, hotspot.city);
        println!(
            "   Location: {:.4}, {:.4}",
            hotspot.latitude, hotspot.longitude
        );
        println!("   Demand score: {}/100", hotspot.demand_score);
        println!("   Properties: {}", hotspot.property_count);
        println!("   Avg price: ₹{} Cr", hotspot.avg_price);
    }

    Ok(())
}
