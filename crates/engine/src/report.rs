// In crates/engine/src/report.rs

use chrono::{DateTime, Utc};
use core_types::{Signal, Symbol};
use serde::Serialize;

/// What happened to a single symbol during a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolOutcome {
    Completed { symbol: Symbol, signal_count: usize },
    Failed { symbol: Symbol, error: String },
}

impl SymbolOutcome {
    pub fn symbol(&self) -> &Symbol {
        match self {
            SymbolOutcome::Completed { symbol, .. } | SymbolOutcome::Failed { symbol, .. } => symbol,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SymbolOutcome::Failed { .. })
    }
}

/// The result of running one strategy across a list of symbols.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub strategy_name: String,
    pub symbols: Vec<Symbol>,
    pub executed_at: DateTime<Utc>,
    /// One entry per requested symbol, in request order.
    pub outcomes: Vec<SymbolOutcome>,
    pub signals: Vec<Signal>,
    pub total_signals: usize,
    pub total_symbols: usize,
    pub failed_symbols: usize,
}

impl ExecutionReport {
    pub(crate) fn new(
        strategy_name: String,
        symbols: Vec<Symbol>,
        executed_at: DateTime<Utc>,
        results: Vec<(Symbol, Result<Vec<Signal>, String>)>,
    ) -> Self {
        let mut outcomes = Vec::with_capacity(results.len());
        let mut signals = Vec::new();

        for (symbol, result) in results {
            match result {
                Ok(symbol_signals) => {
                    outcomes.push(SymbolOutcome::Completed {
                        symbol,
                        signal_count: symbol_signals.len(),
                    });
                    signals.extend(symbol_signals);
                }
                Err(error) => outcomes.push(SymbolOutcome::Failed { symbol, error }),
            }
        }

        let failed_symbols = outcomes.iter().filter(|o| o.is_failed()).count();
        Self {
            strategy_name,
            total_symbols: symbols.len(),
            symbols,
            executed_at,
            total_signals: signals.len(),
            outcomes,
            signals,
            failed_symbols,
        }
    }

    /// Signals produced for `symbol`.
    pub fn signals_for<'a>(&'a self, symbol: &'a Symbol) -> impl Iterator<Item = &'a Signal> + 'a {
        self.signals.iter().filter(move |s| &s.symbol == symbol)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SymbolOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}
