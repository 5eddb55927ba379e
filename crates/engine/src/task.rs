// In crates/engine/src/task.rs

use crate::provider::MarketDataProvider;
use core_types::{Signal, Symbol};
use std::sync::Arc;
use strategies::Strategy;

/// A self-contained unit of work that evaluates one strategy on one symbol.
pub struct SymbolTask {
    symbol: Symbol,
    strategy: Arc<dyn Strategy>,
    provider: Arc<dyn MarketDataProvider>,
}

impl SymbolTask {
    pub fn new(
        symbol: Symbol,
        strategy: Arc<dyn Strategy>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            symbol,
            strategy,
            provider,
        }
    }

    /// Fetches the look-back window and runs the strategy over it.
    pub async fn run(&self) -> anyhow::Result<Vec<Signal>> {
        let lookback = self.strategy.required_data_period();
        let bars = self.provider.fetch_bars(&self.symbol, lookback).await?;

        let current_price = match self.provider.current_price(&self.symbol).await? {
            Some(price) => price,
            None => match bars.last() {
                Some(bar) => bar.close,
                None => {
                    tracing::warn!(symbol = %self.symbol, "No market data available, skipping.");
                    return Ok(Vec::new());
                }
            },
        };

        let signals = self
            .strategy
            .generate_signals(&self.symbol, &bars, current_price)
            .await?;

        tracing::debug!(
            symbol = %self.symbol,
            bars = bars.len(),
            signals = signals.len(),
            "Symbol evaluated."
        );
        Ok(signals)
    }
}
