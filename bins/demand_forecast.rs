//! Housing demand analysis CLI
//!
//! Usage:
//!   demand_forecast analyze
//!   demand_forecast analyze --top-k 10 --parquet
//!   demand_forecast analyze --mock --out /tmp/predictions.json
//!   demand_forecast datasets

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use demand::analysis::{
    discover_datasets, generate_mock_listings, load_dataset_or_empty, run_analysis,
    write_hotspots_parquet, write_report_json, AnalysisInput, AnalysisOptions, AnalysisReport,
    DatasetSource,
};
use demand::config::Config;

#[derive(Parser)]
#[command(name = "demand_forecast")]
#[command(about = "Housing demand scoring and hotspot forecasting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline and write the JSON report
    Analyze {
        #[arg(long, default_value = "config/demand.toml")]
        config: String,
        /// Override the configured number of hotspots to report
        #[arg(long)]
        top_k: Option<usize>,
        /// Use generated listings instead of the configured datasets
        #[arg(long)]
        mock: bool,
        /// Seed for mock listing generation
        #[arg(long, default_value = "1")]
        mock_seed: u64,
        /// Override the configured report path
        #[arg(long)]
        out: Option<String>,
        /// Also write the ranked hotspots as Parquet
        #[arg(long)]
        parquet: bool,
    },
    /// List candidate CSV datasets under the data directory
    Datasets {
        #[arg(long, default_value = "config/demand.toml")]
        config: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            config,
            top_k,
            mock,
            mock_seed,
            out,
            parquet,
        } => run_analyze(&config, top_k, mock, mock_seed, out, parquet),
        Commands::Datasets { config } => run_datasets(&config),
    }
}

fn run_analyze(
    config_path: &str,
    top_k: Option<usize>,
    mock: bool,
    mock_seed: u64,
    out: Option<String>,
    parquet: bool,
) -> Result<()> {
    let config = load_config(config_path);

    let input = if mock {
        tracing::info!("Using mock listings (seed={})", mock_seed);
        AnalysisInput {
            houses: generate_mock_listings(60, mock_seed),
            cleaned: Vec::new(),
        }
    } else {
        AnalysisInput {
            houses: load_dataset_or_empty(&config.houses_path(), DatasetSource::Houses),
            cleaned: load_dataset_or_empty(&config.cleaned_path(), DatasetSource::Cleaned),
        }
    };

    let options = AnalysisOptions::new(Utc::now())
        .with_top_k(top_k.unwrap_or(config.analysis.top_k));

    let report = run_analysis(&input, &options);

    let out_path = out.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(&config.output.results_file));
    write_report_json(&out_path, &report)?;

    if parquet || config.output.write_parquet {
        write_hotspots_parquet(
            Path::new(&config.output.hotspots_parquet),
            &report.demand_forecast.hotspots,
        )?;
    }

    print_summary(&report);
    Ok(())
}

fn run_datasets(config_path: &str) -> Result<()> {
    let config = load_config(config_path);
    let found = discover_datasets(Path::new(&config.data_dir));

    if found.is_empty() {
        println!("No CSV datasets under {}", config.data_dir);
        return Ok(());
    }

    println!("Datasets under {}:", config.data_dir);
    for path in found {
        println!("  {}", path.display());
    }
    Ok(())
}

fn load_config(path: &str) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

fn print_summary(report: &AnalysisReport) {
    let summary = &report.analysis_summary;
    let forecast = &report.demand_forecast;

    println!("\n=== Analysis Summary ===");
    println!("Properties analyzed: {}", summary.total_properties_analyzed);
    println!("Qualifying locations: {}", summary.valid_locations);
    println!("Hotspots identified: {}", summary.top_hotspots_identified);

    println!("\n=== Top 5 Demand Hotspots ===");
    for (i, spot) in forecast.hotspots.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, spot.area, spot.city);
        println!("   Demand score: {}/100", spot.demand_score);
        println!("   Avg price: {}", spot.avg_price);
        println!("   Properties: {}", spot.property_count);
        println!("   Investment: {}", spot.investment_potential);
        println!("   Priority: {}", spot.priority_level);
        println!("   {}", spot.recommendation);
    }

    let trends = &forecast.market_trends;
    println!("\n=== Market Insights ===");
    println!("Market sentiment: {}", trends.market_sentiment);
    println!("Average demand score: {}/100", trends.average_demand_score);
    let leading: Vec<&str> = trends
        .leading_cities
        .iter()
        .map(|(city, _)| city.as_str())
        .collect();
    println!("Leading cities: {}", leading.join(", "));
}
