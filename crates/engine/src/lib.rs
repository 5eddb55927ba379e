// In crates/engine/src/lib.rs

pub mod error;
pub mod provider;
pub mod report;
pub mod task;

use crate::task::SymbolTask;
use anyhow::Context;
use chrono::Utc;
use core_types::{Signal, Symbol};
use futures::future;
use std::sync::Arc;
use strategies::Strategy;
use tokio::sync::Semaphore;

pub use error::{EngineError, Result};
pub use provider::{JsonDirProvider, MarketDataProvider};
pub use report::{ExecutionReport, SymbolOutcome};

pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Runs one strategy across many symbols.
///
/// Every symbol gets its own task; a failure in one (including a panic) is
/// recorded in its outcome and never stops the others.
pub struct SignalEngine {
    strategy: Arc<dyn Strategy>,
    provider: Arc<dyn MarketDataProvider>,
    max_concurrency: usize,
}

impl SignalEngine {
    pub fn new(strategy: Arc<dyn Strategy>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            strategy,
            provider,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Caps how many symbols are evaluated at the same time.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Result<Self> {
        if max_concurrency == 0 {
            return Err(EngineError::InvalidConcurrency);
        }
        self.max_concurrency = max_concurrency;
        Ok(self)
    }

    pub fn strategy(&self) -> &Arc<dyn Strategy> {
        &self.strategy
    }

    /// Evaluates the strategy on every symbol and collects the outcomes.
    pub async fn execute(&self, symbols: &[Symbol]) -> Result<ExecutionReport> {
        if symbols.is_empty() {
            return Err(EngineError::NoSymbols);
        }

        let executed_at = Utc::now();
        tracing::info!(
            strategy = %self.strategy.name(),
            count = symbols.len(),
            "Executing strategy across symbols."
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut task_handles = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let task = SymbolTask::new(
                symbol.clone(),
                Arc::clone(&self.strategy),
                Arc::clone(&self.provider),
            );
            let semaphore = Arc::clone(&semaphore);

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("Concurrency limiter was closed")?;
                task.run().await
            });
            task_handles.push(handle);
        }

        // `join_all` keeps the spawn order, so results line up with `symbols`.
        let results = future::join_all(task_handles).await;

        let results: Vec<(Symbol, std::result::Result<Vec<Signal>, String>)> = symbols
            .iter()
            .cloned()
            .zip(results)
            .map(|(symbol, joined)| {
                let outcome = match joined {
                    Ok(Ok(signals)) => Ok(signals),
                    Ok(Err(e)) => {
                        tracing::error!(%symbol, error = %format!("{e:#}"), "Signal generation failed.");
                        Err(format!("{e:#}"))
                    }
                    Err(join_error) => {
                        tracing::error!(%symbol, error = %join_error, "Symbol task aborted.");
                        Err(format!("task aborted: {join_error}"))
                    }
                };
                (symbol, outcome)
            })
            .collect();

        let report = ExecutionReport::new(
            self.strategy.name().to_string(),
            symbols.to_vec(),
            executed_at,
            results,
        );

        tracing::info!(
            strategy = %report.strategy_name,
            total_symbols = report.total_symbols,
            total_signals = report.total_signals,
            failed_symbols = report.failed_symbols,
            "Strategy execution finished."
        );
        Ok(report)
    }
}
