// In crates/engine/src/provider.rs

use anyhow::Context;
use async_trait::async_trait;
use core_types::{PriceBar, Symbol};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// The data-fetch collaborator the engine pulls history from.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Returns at most `limit` of the most recent bars for `symbol`, oldest first.
    async fn fetch_bars(&self, symbol: &Symbol, limit: usize) -> anyhow::Result<Vec<PriceBar>>;

    /// A live quote, if the provider has one.
    ///
    /// The engine falls back to the last close when this returns `None`.
    async fn current_price(&self, _symbol: &Symbol) -> anyhow::Result<Option<Decimal>> {
        Ok(None)
    }
}

/// Serves bars from `<dir>/<SYMBOL>.json`, each file a JSON array of `PriceBar`.
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    dir: PathBuf,
}

impl JsonDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the bar file for `symbol`, which must stay inside `dir`.
    fn path_for(&self, symbol: &Symbol) -> anyhow::Result<PathBuf> {
        let name = symbol.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            anyhow::bail!("Symbol `{name}` is not a valid market data file name");
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[async_trait]
impl MarketDataProvider for JsonDirProvider {
    async fn fetch_bars(&self, symbol: &Symbol, limit: usize) -> anyhow::Result<Vec<PriceBar>> {
        let path = self.path_for(symbol)?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read market data from {}", path.display()))?;

        let mut bars: Vec<PriceBar> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse market data in {}", path.display()))?;

        // Untimestamped bars keep file order.
        if bars.iter().all(|bar| bar.timestamp.is_some()) {
            bars.sort_by_key(|bar| bar.timestamp);
        }

        let skip = bars.len().saturating_sub(limit);
        bars.drain(..skip);

        tracing::debug!(%symbol, bars = bars.len(), limit, "Loaded market data from disk.");
        Ok(bars)
    }
}
