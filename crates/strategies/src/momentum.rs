// In crates/strategies/src/momentum.rs

use crate::indicators::{CrossoverState, MovingAverageSeries, calculate_ma, detect_crossover};
use crate::types::MomentumSettings;
use crate::{Error, Result, Strategy, StrategyMeta};
use async_trait::async_trait;
use core_types::{
    PriceBar, Signal, SignalType, StrategyDefinition, StrategyParameters, StrategyStatus,
    StrategyType, Symbol,
};
use num_traits::cast::ToPrimitive;
use rust_decimal::Decimal;

/// Confidence used when the latest averages cannot be compared.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Moving-average crossover strategy.
///
/// Emits BUY on a golden cross and SELL on a death cross of the fast average
/// over the slow one, evaluated on the last bar of the window only.
#[derive(Debug, Clone)]
pub struct MomentumStrategy {
    meta: StrategyMeta,
    /// Resolved once from the raw parameter map.
    settings: MomentumSettings,
}

impl MomentumStrategy {
    /// Creates a new `MomentumStrategy`, validating its parameters.
    pub fn new(
        name: impl Into<String>,
        parameters: StrategyParameters,
        status: StrategyStatus,
    ) -> Result<Self> {
        let settings = MomentumSettings::from_parameters(&parameters)?;
        let strategy = Self {
            meta: StrategyMeta::new(name, StrategyType::Momentum, parameters, status),
            settings,
        };
        strategy.validate_parameters()?;
        Ok(strategy)
    }

    pub fn from_definition(definition: &StrategyDefinition) -> Result<Self> {
        Self::new(
            definition.name.clone(),
            definition.parameters.clone(),
            definition.status,
        )
    }

    pub fn settings(&self) -> &MomentumSettings {
        &self.settings
    }

    fn build_signal(
        &self,
        crossover: CrossoverState,
        symbol: &Symbol,
        current_price: Decimal,
        fast_ma: &MovingAverageSeries,
        slow_ma: &MovingAverageSeries,
    ) -> Result<Option<Signal>> {
        let MomentumSettings {
            fast_period,
            slow_period,
            ma_type,
            ..
        } = self.settings;

        let (signal_type, reason) = match crossover {
            CrossoverState::Golden => (
                SignalType::Buy,
                format!("Golden cross detected: {ma_type}{fast_period} crossed above {ma_type}{slow_period}"),
            ),
            CrossoverState::Death => (
                SignalType::Sell,
                format!("Death cross detected: {ma_type}{fast_period} crossed below {ma_type}{slow_period}"),
            ),
            CrossoverState::None => return Ok(None),
        };

        let confidence = calculate_confidence(fast_ma, slow_ma);
        let signal = Signal::new(symbol.clone(), signal_type, current_price, reason, confidence)?;
        Ok(Some(signal))
    }
}

#[async_trait]
impl Strategy for MomentumStrategy {
    fn meta(&self) -> &StrategyMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut StrategyMeta {
        &mut self.meta
    }

    fn required_parameters(&self) -> Vec<&'static str> {
        self.settings.convention.keys().to_vec()
    }

    /// Twice the slow window: warm-up plus room for the previous comparison point.
    fn required_data_period(&self) -> usize {
        self.settings.slow_period.saturating_mul(2)
    }

    async fn generate_signals(
        &self,
        symbol: &Symbol,
        market_data: &[PriceBar],
        current_price: Decimal,
    ) -> Result<Vec<Signal>> {
        let MomentumSettings {
            fast_period,
            slow_period,
            ma_type,
            ..
        } = self.settings;

        // 1. Ensure we have enough data to calculate the slow average.
        if market_data.len() < slow_period {
            tracing::warn!(
                strategy = %self.name(),
                %symbol,
                bars = market_data.len(),
                required = slow_period,
                "Insufficient data for crossover evaluation."
            );
            return Ok(Vec::new());
        }

        // 2. Closing prices, oldest first.
        let closes = market_data
            .iter()
            .enumerate()
            .map(|(index, bar)| bar.close.to_f64().ok_or(Error::MalformedBar { index }))
            .collect::<Result<Vec<f64>>>()?;

        // 3. The crossover logic
        let fast_ma = calculate_ma(ma_type, &closes, fast_period);
        let slow_ma = calculate_ma(ma_type, &closes, slow_period);
        let crossover = detect_crossover(&fast_ma, &slow_ma);

        match self.build_signal(crossover, symbol, current_price, &fast_ma, &slow_ma)? {
            Some(signal) => {
                tracing::info!(
                    strategy = %self.name(),
                    %symbol,
                    signal_type = %signal.signal_type,
                    confidence = signal.confidence(),
                    reason = %signal.reason,
                    "Strategy generated a signal."
                );
                Ok(vec![signal])
            }
            None => {
                tracing::debug!(strategy = %self.name(), %symbol, "No crossover detected.");
                Ok(Vec::new())
            }
        }
    }
}

/// Maps the separation of the latest fast and slow averages to a confidence.
///
/// Bands on `|fast - slow| / slow` in percent: below 1 → 0.6, below 2 → 0.7,
/// below 3 → 0.8, otherwise 0.9. Falls back to 0.5 when either latest value
/// is missing or the ratio is not finite.
pub fn calculate_confidence(fast_ma: &[Option<f64>], slow_ma: &[Option<f64>]) -> f64 {
    let (Some(Some(fast)), Some(Some(slow))) = (fast_ma.last(), slow_ma.last()) else {
        return DEFAULT_CONFIDENCE;
    };

    let diff_percent = (fast - slow).abs() / slow * 100.0;
    if !diff_percent.is_finite() {
        return DEFAULT_CONFIDENCE;
    }

    let confidence = if diff_percent < 1.0 {
        0.6
    } else if diff_percent < 2.0 {
        0.7
    } else if diff_percent < 3.0 {
        0.8
    } else {
        0.9
    };

    tracing::debug!(diff_percent, confidence, "Confidence calculated.");
    confidence
}
