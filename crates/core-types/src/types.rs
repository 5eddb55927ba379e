// In crates/core-types/src/types.rs

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque instrument identifier (e.g. "005930", "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single point of a price history, as delivered by the market-data layer.
///
/// Only `close` is required. Bars are expected oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
    pub close: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

impl PriceBar {
    /// A bar carrying nothing but a closing price.
    pub fn from_close(close: Decimal) -> Self {
        Self {
            timestamp: None,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// A trading decision produced by a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SignalRecord")]
pub struct Signal {
    /// Wall-clock time at which the signal was generated.
    pub timestamp: DateTime<Utc>,
    pub symbol: Symbol,
    pub signal_type: SignalType,
    /// The reference price supplied by the caller.
    pub price: Decimal,
    /// Left to the risk-management layer; strategies never set it.
    pub quantity: Option<u32>,
    pub reason: String,
    confidence: f64,
}

impl Signal {
    /// Builds a signal stamped with the current time and no quantity.
    ///
    /// Fails if `confidence` is NaN or outside `[0, 1]`.
    pub fn new(
        symbol: Symbol,
        signal_type: SignalType,
        price: Decimal,
        reason: impl Into<String>,
        confidence: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            timestamp: Utc::now(),
            symbol,
            signal_type,
            price,
            quantity: None,
            reason: reason.into(),
            confidence,
        })
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Wire shape of a `Signal`, checked before it becomes one.
#[derive(Deserialize)]
struct SignalRecord {
    timestamp: DateTime<Utc>,
    symbol: Symbol,
    signal_type: SignalType,
    price: Decimal,
    quantity: Option<u32>,
    reason: String,
    confidence: f64,
}

impl TryFrom<SignalRecord> for Signal {
    type Error = Error;

    fn try_from(record: SignalRecord) -> Result<Self> {
        let mut signal = Signal::new(
            record.symbol,
            record.signal_type,
            record.price,
            record.reason,
            record.confidence,
        )?;
        signal.timestamp = record.timestamp;
        signal.quantity = record.quantity;
        Ok(signal)
    }
}
