// In crates/strategies/src/meta.rs

use chrono::{DateTime, Utc};
use core_types::{StrategyParameters, StrategyStatus, StrategyType};
use serde::Serialize;

/// Identity and supervisory state shared by every strategy.
///
/// Everything except `status` is fixed at construction.
#[derive(Debug, Clone)]
pub struct StrategyMeta {
    name: String,
    strategy_type: StrategyType,
    parameters: StrategyParameters,
    status: StrategyStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StrategyMeta {
    pub fn new(
        name: impl Into<String>,
        strategy_type: StrategyType,
        parameters: StrategyParameters,
        status: StrategyStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            strategy_type,
            parameters,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy_type(&self) -> StrategyType {
        self.strategy_type
    }

    pub fn parameters(&self) -> &StrategyParameters {
        &self.parameters
    }

    pub fn status(&self) -> StrategyStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_status(&mut self, status: StrategyStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// A serializable snapshot of a strategy, for listings and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub name: String,
    pub strategy_type: StrategyType,
    pub status: StrategyStatus,
    pub parameters: StrategyParameters,
    pub required_data_period: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
