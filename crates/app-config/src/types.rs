// In crates/app-config/src/types.rs

use crate::{Error, Result};
use core_types::StrategyDefinition;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    #[serde(default)]
    pub scanner: ScannerSettings,
    /// Stored strategy definitions, one `[[strategies]]` table each.
    #[serde(default)]
    pub strategies: Vec<StrategyDefinition>,
}

impl Settings {
    /// Looks a strategy definition up by name.
    pub fn strategy(&self, name: &str) -> Result<&StrategyDefinition> {
        self.strategies
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScannerSettings {
    /// Directory holding one `<SYMBOL>.json` bar file per symbol.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Overrides the engine's concurrency limit when set.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    /// Symbols scanned when none are given on the command line.
    #[serde(default)]
    pub watchlist: Vec<String>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_concurrency: None,
            watchlist: Vec::new(),
        }
    }
}

/// Helper function for serde defaults
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
