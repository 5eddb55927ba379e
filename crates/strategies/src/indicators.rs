// In crates/strategies/src/indicators.rs

//! Moving averages and crossover detection over closing-price sequences.
//!
//! Every series returned here has the same length as its input. Positions that
//! cannot be computed yet (the first `period - 1`) hold `None`.

use crate::types::MaType;
use serde::Serialize;

/// One entry per input price; `None` until the look-back window is filled.
pub type MovingAverageSeries = Vec<Option<f64>>;

/// The relationship change between a fast and a slow average on the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverState {
    /// Fast average moved from below to strictly above the slow one.
    Golden,
    /// Fast average moved from above to strictly below the slow one.
    Death,
    None,
}

/// Simple moving average.
pub fn calculate_sma(prices: &[f64], period: usize) -> MovingAverageSeries {
    if prices.is_empty() || period == 0 {
        return Vec::new();
    }
    if period > prices.len() {
        return vec![None; prices.len()];
    }

    let mut values = vec![None; period - 1];
    values.extend(
        prices
            .windows(period)
            .map(|window| Some(window.iter().sum::<f64>() / period as f64)),
    );
    values
}

/// Exponential moving average, seeded with the SMA of the first `period` prices.
pub fn calculate_ema(prices: &[f64], period: usize) -> MovingAverageSeries {
    if prices.is_empty() || period == 0 {
        return Vec::new();
    }
    if period > prices.len() {
        return vec![None; prices.len()];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut values = vec![None; period - 1];
    values.reserve(prices.len() - values.len());

    let mut ema = prices[..period].iter().sum::<f64>() / period as f64;
    values.push(Some(ema));

    for &price in &prices[period..] {
        ema = (price - ema) * multiplier + ema;
        values.push(Some(ema));
    }
    values
}

/// Computes the moving average of the requested kind.
pub fn calculate_ma(kind: MaType, prices: &[f64], period: usize) -> MovingAverageSeries {
    match kind {
        MaType::Sma => calculate_sma(prices, period),
        MaType::Ema => calculate_ema(prices, period),
    }
}

/// Classifies the transition between the last two points of `fast` and `slow`.
///
/// Only the final step is inspected. Equality on either step is never a cross.
pub fn detect_crossover(fast: &[Option<f64>], slow: &[Option<f64>]) -> CrossoverState {
    let (Some((fast_prev, fast_curr)), Some((slow_prev, slow_curr))) =
        (last_two(fast), last_two(slow))
    else {
        return CrossoverState::None;
    };

    if fast_prev < slow_prev && fast_curr > slow_curr {
        CrossoverState::Golden
    } else if fast_prev > slow_prev && fast_curr < slow_curr {
        CrossoverState::Death
    } else {
        CrossoverState::None
    }
}

fn last_two(series: &[Option<f64>]) -> Option<(f64, f64)> {
    match series {
        [.., Some(prev), Some(curr)] => Some((*prev, *curr)),
        _ => None,
    }
}
