// In crates/strategies/src/factory.rs

//! Builds strategy instances from stored definitions.

use crate::momentum::MomentumStrategy;
use crate::{Error, Result, Strategy};
use core_types::{StrategyDefinition, StrategyType};

/// Instantiates the strategy described by `definition`.
pub fn create_strategy(definition: &StrategyDefinition) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match definition.strategy_type {
        StrategyType::Momentum => Box::new(MomentumStrategy::from_definition(definition)?),
        unsupported @ (StrategyType::MeanReversion | StrategyType::Breakout | StrategyType::Custom) => {
            return Err(Error::UnsupportedStrategy(unsupported));
        }
    };

    tracing::debug!(
        name = %definition.name,
        strategy_type = %definition.strategy_type,
        "Strategy instance created."
    );
    Ok(strategy)
}
