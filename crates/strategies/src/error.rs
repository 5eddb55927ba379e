// In crates/strategies/src/error.rs

use core_types::StrategyType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Bar {index} has a close price that cannot be used for indicator math")]
    MalformedBar { index: usize },

    #[error("Strategy type {0} is not supported")]
    UnsupportedStrategy(StrategyType),

    #[error("Failed to build signal: {0}")]
    Signal(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
