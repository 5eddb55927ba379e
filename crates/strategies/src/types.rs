// In crates/strategies/src/types.rs

use crate::{Error, Result};
use core_types::StrategyParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Which moving average a crossover strategy runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaType {
    #[default]
    Sma,
    Ema,
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaType::Sma => f.write_str("SMA"),
            MaType::Ema => f.write_str("EMA"),
        }
    }
}

/// The naming scheme a parameter map used for its look-back windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodConvention {
    /// `fast_period` / `slow_period`
    FastSlow,
    /// `short_window` / `long_window`
    ShortLong,
}

impl PeriodConvention {
    /// Parameter keys for the (fast, slow) windows.
    pub fn keys(self) -> [&'static str; 2] {
        match self {
            PeriodConvention::FastSlow => ["fast_period", "slow_period"],
            PeriodConvention::ShortLong => ["short_window", "long_window"],
        }
    }

    /// Picks the convention whose two keys are both present, `fast/slow` first.
    fn detect(parameters: &StrategyParameters) -> Option<Self> {
        [PeriodConvention::FastSlow, PeriodConvention::ShortLong]
            .into_iter()
            .find(|convention| convention.keys().iter().all(|key| parameters.contains_key(*key)))
    }

    /// The convention a partial parameter map appears to be aiming for.
    fn hinted(parameters: &StrategyParameters) -> Self {
        let [short, long] = PeriodConvention::ShortLong.keys();
        if parameters.contains_key(short) || parameters.contains_key(long) {
            PeriodConvention::ShortLong
        } else {
            PeriodConvention::FastSlow
        }
    }
}

/// Largest look-back window a strategy may ask for.
pub const MAX_PERIOD: usize = 1_000_000;

/// Canonical parameters of the momentum (MA crossover) strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MomentumSettings {
    pub fast_period: usize,
    pub slow_period: usize,
    pub ma_type: MaType,
    /// The key names the settings were read from.
    pub convention: PeriodConvention,
}

impl MomentumSettings {
    /// Resolves a raw parameter map into canonical settings.
    pub fn from_parameters(parameters: &StrategyParameters) -> Result<Self> {
        let convention = match PeriodConvention::detect(parameters) {
            Some(convention) => convention,
            None => {
                let hinted = PeriodConvention::hinted(parameters);
                let missing = hinted
                    .keys()
                    .into_iter()
                    .find(|key| !parameters.contains_key(*key))
                    .unwrap_or(hinted.keys()[0]);
                return Err(Error::MissingParameter(missing.to_string()));
            }
        };

        let [fast_key, slow_key] = convention.keys();
        let fast_period = read_period(parameters, fast_key)?;
        let slow_period = read_period(parameters, slow_key)?;
        let ma_type = read_ma_type(parameters)?;

        Ok(Self {
            fast_period,
            slow_period,
            ma_type,
            convention,
        })
    }
}

fn read_period(parameters: &StrategyParameters, key: &str) -> Result<usize> {
    let value = parameters
        .get(key)
        .ok_or_else(|| Error::MissingParameter(key.to_string()))?;

    let invalid = |reason: &str| Error::InvalidParameter {
        name: key.to_string(),
        reason: format!("{reason}, got {value}"),
    };

    let too_large = || invalid(&format!("period must not exceed {MAX_PERIOD}"));

    // Config loaders occasionally hand integers over as floats (e.g. 20.0).
    let period = match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(p), _) => usize::try_from(p).map_err(|_| too_large())?,
            (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => {
                if f > MAX_PERIOD as f64 {
                    return Err(too_large());
                }
                f as usize
            }
            _ => return Err(invalid("expected a positive integer")),
        },
        _ => return Err(invalid("expected a positive integer")),
    };

    if period == 0 {
        return Err(invalid("period must be at least 1"));
    }
    if period > MAX_PERIOD {
        return Err(too_large());
    }
    Ok(period)
}

fn read_ma_type(parameters: &StrategyParameters) -> Result<MaType> {
    match parameters.get("ma_type") {
        None | Some(Value::Null) => Ok(MaType::Sma),
        Some(Value::String(raw)) => match raw.to_uppercase().as_str() {
            "EMA" => Ok(MaType::Ema),
            "SMA" => Ok(MaType::Sma),
            other => {
                tracing::warn!(ma_type = %other, "Unknown moving-average type, falling back to SMA.");
                Ok(MaType::Sma)
            }
        },
        Some(other) => Err(Error::InvalidParameter {
            name: "ma_type".to_string(),
            reason: format!("expected \"SMA\" or \"EMA\", got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> StrategyParameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("test parameters must be an object"),
        }
    }

    #[test]
    fn resolves_fast_slow_convention() {
        let settings =
            MomentumSettings::from_parameters(&params(json!({"fast_period": 5, "slow_period": 20})))
                .unwrap();
        assert_eq!(settings.fast_period, 5);
        assert_eq!(settings.slow_period, 20);
        assert_eq!(settings.ma_type, MaType::Sma);
        assert_eq!(settings.convention, PeriodConvention::FastSlow);
    }

    #[test]
    fn resolves_short_long_convention() {
        let settings = MomentumSettings::from_parameters(&params(
            json!({"short_window": 10, "long_window": 30, "ma_type": "ema"}),
        ))
        .unwrap();
        assert_eq!(settings.fast_period, 10);
        assert_eq!(settings.slow_period, 30);
        assert_eq!(settings.ma_type, MaType::Ema);
        assert_eq!(settings.convention, PeriodConvention::ShortLong);
    }

    #[test]
    fn fast_slow_wins_when_both_are_complete() {
        let settings = MomentumSettings::from_parameters(&params(json!({
            "fast_period": 3, "slow_period": 5, "short_window": 10, "long_window": 30
        })))
        .unwrap();
        assert_eq!((settings.fast_period, settings.slow_period), (3, 5));
    }

    #[test]
    fn complete_short_long_beats_partial_fast_slow() {
        let settings = MomentumSettings::from_parameters(&params(json!({
            "fast_period": 3, "short_window": 10, "long_window": 30
        })))
        .unwrap();
        assert_eq!(settings.convention, PeriodConvention::ShortLong);
    }

    #[test]
    fn missing_everything_names_fast_period() {
        let err = MomentumSettings::from_parameters(&params(json!({"ma_type": "SMA"}))).unwrap_err();
        assert_eq!(err, Error::MissingParameter("fast_period".into()));
    }

    #[test]
    fn partial_short_long_names_the_absent_key() {
        let err =
            MomentumSettings::from_parameters(&params(json!({"short_window": 10}))).unwrap_err();
        assert_eq!(err, Error::MissingParameter("long_window".into()));

        let err = MomentumSettings::from_parameters(&params(json!({"fast_period": 10}))).unwrap_err();
        assert_eq!(err, Error::MissingParameter("slow_period".into()));
    }

    #[test]
    fn rejects_non_positive_or_fractional_periods() {
        for bad in [json!(0), json!(-3), json!(2.5), json!("5")] {
            let err = MomentumSettings::from_parameters(&params(
                json!({"fast_period": bad, "slow_period": 20}),
            ))
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { ref name, .. } if name == "fast_period"),
                "unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn accepts_integral_floats() {
        let settings = MomentumSettings::from_parameters(&params(
            json!({"fast_period": 5.0, "slow_period": 20.0}),
        ))
        .unwrap();
        assert_eq!((settings.fast_period, settings.slow_period), (5, 20));
    }

    #[test]
    fn rejects_periods_above_the_cap() {
        for bad in [json!(1e300), json!(9_223_372_036_854_775_808u64), json!(MAX_PERIOD + 1)] {
            let err = MomentumSettings::from_parameters(&params(
                json!({"fast_period": 3, "slow_period": bad}),
            ))
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { ref name, .. } if name == "slow_period"),
                "unexpected error {err:?}"
            );
        }

        let settings = MomentumSettings::from_parameters(&params(
            json!({"fast_period": 3, "slow_period": MAX_PERIOD}),
        ))
        .unwrap();
        assert_eq!(settings.slow_period, MAX_PERIOD);
    }

    #[test]
    fn unknown_ma_type_falls_back_to_sma() {
        let settings = MomentumSettings::from_parameters(&params(
            json!({"fast_period": 5, "slow_period": 20, "ma_type": "wma"}),
        ))
        .unwrap();
        assert_eq!(settings.ma_type, MaType::Sma);
    }

    #[test]
    fn non_string_ma_type_is_invalid() {
        let err = MomentumSettings::from_parameters(&params(
            json!({"fast_period": 5, "slow_period": 20, "ma_type": 1}),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "ma_type"));
    }
}
