use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scene::Layout;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "RUSTY_SPIRAL_CONFIG";
/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "rusty-spiral.json";

// ---------------------------------------------------------------------------
// Config – immutable settings injected into the viewer at start-up
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Directory the catalog file names are resolved against.
    pub data_dir: PathBuf,
    /// Datasets offered by the selector, in display order.
    pub files: Vec<String>,
    /// Hex colors used for labels and features.
    pub colors: Vec<String>,
    /// Spiral step length in pixels.
    pub step: f64,
    /// Marker radius in pixels.
    pub radius: f64,
    /// Minkowski exponent for the perspective layout.
    pub p: f64,
    /// Layout shown at start-up.
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            data_dir: PathBuf::from("data"),
            files: [
                "iris.csv",
                "abalone.csv",
                "cancer.csv",
                "fertility.csv",
                "parkinsons.csv",
                "seeds.csv",
                "tissue.csv",
            ]
            .map(String::from)
            .to_vec(),
            colors: [
                "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628",
                "#f781bf", "#999999",
            ]
            .map(String::from)
            .to_vec(),
            step: 50.0,
            radius: 3.0,
            p: 2.0,
            layout: Layout::Spiral,
        }
    }
}

impl Config {
    /// Path of the configuration file: `$RUSTY_SPIRAL_CONFIG` or
    /// `./rusty-spiral.json`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, text).with_context(|| format!("writing config {}", path.display()))
    }

    /// Full path of a catalog entry.
    pub fn dataset_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}
