// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No symbols were given to execute the strategy on")]
    NoSymbols,

    #[error("Max concurrency must be at least 1")]
    InvalidConcurrency,
}

pub type Result<T> = std::result::Result<T, EngineError>;
