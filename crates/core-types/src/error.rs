// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Signal confidence must lie within [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
