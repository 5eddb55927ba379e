// In crates/core-types/src/strategy.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form strategy parameters, keyed by parameter name.
pub type StrategyParameters = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyType {
    Momentum,
    MeanReversion,
    Breakout,
    Custom,
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyType::Momentum => "MOMENTUM",
            StrategyType::MeanReversion => "MEAN_REVERSION",
            StrategyType::Breakout => "BREAKOUT",
            StrategyType::Custom => "CUSTOM",
        };
        f.write_str(s)
    }
}

/// Supervisory state of a strategy. Signal generation does not look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyStatus {
    Active,
    #[default]
    Inactive,
    Backtesting,
}

/// A stored strategy definition, as it comes out of configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    pub strategy_type: StrategyType,
    #[serde(default)]
    pub status: StrategyStatus,
    // This will hold the `parameters = { ... }` table from the config file
    #[serde(default)]
    pub parameters: StrategyParameters,
}
