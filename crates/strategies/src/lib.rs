// In crates/strategies/src/lib.rs

use async_trait::async_trait;
use core_types::{PriceBar, Signal, StrategyParameters, StrategyStatus, StrategyType, Symbol};
use rust_decimal::Decimal;

pub mod error;
pub mod factory;
pub mod indicators;
pub mod meta;
pub mod momentum;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use meta::{StrategyMeta, StrategySummary};

/// Look-back a strategy asks for when it does not say otherwise.
pub const DEFAULT_DATA_PERIOD: usize = 60;

/// The universal interface for a trading strategy.
///
/// A strategy turns a window of historical bars into zero or more `Signal`s.
/// Signal generation never mutates the strategy, so a single instance can be
/// shared across tasks evaluating different symbols.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Identity and supervisory state.
    fn meta(&self) -> &StrategyMeta;

    fn meta_mut(&mut self) -> &mut StrategyMeta;

    /// Parameter keys this strategy cannot run without.
    fn required_parameters(&self) -> Vec<&'static str>;

    fn name(&self) -> &str {
        self.meta().name()
    }

    fn strategy_type(&self) -> StrategyType {
        self.meta().strategy_type()
    }

    fn parameters(&self) -> &StrategyParameters {
        self.meta().parameters()
    }

    fn status(&self) -> StrategyStatus {
        self.meta().status()
    }

    /// Called by whatever supervises the strategy; generation ignores it.
    fn update_status(&mut self, status: StrategyStatus) {
        self.meta_mut().set_status(status);
    }

    /// Fails with `MissingParameter` on the first required key that is absent.
    fn validate_parameters(&self) -> Result<()> {
        let parameters = self.parameters();
        match self
            .required_parameters()
            .into_iter()
            .find(|key| !parameters.contains_key(*key))
        {
            Some(missing) => Err(Error::MissingParameter(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Minimum number of historical bars the caller should supply.
    fn required_data_period(&self) -> usize {
        DEFAULT_DATA_PERIOD
    }

    /// Evaluates `market_data` (oldest first) for `symbol`.
    ///
    /// Too little history is not an error: it yields an empty list.
    async fn generate_signals(
        &self,
        symbol: &Symbol,
        market_data: &[PriceBar],
        current_price: Decimal,
    ) -> Result<Vec<Signal>>;

    fn describe(&self) -> StrategySummary {
        let meta = self.meta();
        StrategySummary {
            name: meta.name().to_string(),
            strategy_type: meta.strategy_type(),
            status: meta.status(),
            parameters: meta.parameters().clone(),
            required_data_period: self.required_data_period(),
            created_at: meta.created_at(),
            updated_at: meta.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// Declares two required keys and never signals.
    struct TwoKeyStrategy {
        meta: StrategyMeta,
    }

    impl TwoKeyStrategy {
        fn with_parameters(parameters: Value) -> Self {
            let parameters = match parameters {
                Value::Object(map) => map,
                _ => panic!("test parameters must be an object"),
            };
            Self {
                meta: StrategyMeta::new(
                    "two-key",
                    StrategyType::Custom,
                    parameters,
                    StrategyStatus::Inactive,
                ),
            }
        }
    }

    #[async_trait]
    impl Strategy for TwoKeyStrategy {
        fn meta(&self) -> &StrategyMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut StrategyMeta {
            &mut self.meta
        }

        fn required_parameters(&self) -> Vec<&'static str> {
            vec!["a", "b"]
        }

        async fn generate_signals(
            &self,
            _symbol: &Symbol,
            _market_data: &[PriceBar],
            _current_price: Decimal,
        ) -> Result<Vec<Signal>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn validate_parameters_names_the_absent_key() {
        let strategy = TwoKeyStrategy::with_parameters(json!({"b": 1}));
        assert_eq!(
            strategy.validate_parameters(),
            Err(Error::MissingParameter("a".into()))
        );
    }

    #[test]
    fn validate_parameters_reports_keys_in_declared_order() {
        let strategy = TwoKeyStrategy::with_parameters(json!({"unrelated": true}));
        assert_eq!(
            strategy.validate_parameters(),
            Err(Error::MissingParameter("a".into()))
        );

        let strategy = TwoKeyStrategy::with_parameters(json!({"a": 1}));
        assert_eq!(
            strategy.validate_parameters(),
            Err(Error::MissingParameter("b".into()))
        );
    }

    #[test]
    fn validate_parameters_accepts_a_complete_map() {
        let strategy = TwoKeyStrategy::with_parameters(json!({"a": 1, "b": 2}));
        assert_eq!(strategy.validate_parameters(), Ok(()));
        assert_eq!(strategy.required_data_period(), DEFAULT_DATA_PERIOD);
    }
}
