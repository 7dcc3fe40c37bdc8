use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default = "default_houses_file")]
    pub houses_file: String,
    #[serde(default = "default_cleaned_file")]
    pub cleaned_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_results_file")]
    pub results_file: String,
    #[serde(default = "default_map_file")]
    pub map_file: String,
    #[serde(default = "default_hotspots_parquet")]
    pub hotspots_parquet: String,
    #[serde(default)]
    pub write_parquet: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    #[serde(default = "default_jitter_seed")]
    pub jitter_seed: u64,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config TOML")?;
        Ok(config)
    }

    pub fn houses_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.datasets.houses_file)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.datasets.cleaned_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            datasets: DatasetsConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            geo: GeoConfig::default(),
        }
    }
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            houses_file: default_houses_file(),
            cleaned_file: default_cleaned_file(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: default_results_file(),
            map_file: default_map_file(),
            hotspots_parquet: default_hotspots_parquet(),
            write_parquet: false,
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            jitter_seed: default_jitter_seed(),
        }
    }
}

fn default_data_dir() -> String {
    "datasets".to_string()
}

fn default_houses_file() -> String {
    "houses.csv".to_string()
}

fn default_cleaned_file() -> String {
    "house_cleaned.csv".to_string()
}

fn default_top_k() -> usize {
    15
}

fn default_results_file() -> String {
    "housing_demand_predictions.json".to_string()
}

fn default_map_file() -> String {
    "housing_demand_map_data.json".to_string()
}

fn default_hotspots_parquet() -> String {
    "hotspots.parquet".to_string()
}

fn default_jitter_seed() -> u64 {
    7
}
