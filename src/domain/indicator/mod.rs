//! Technical indicator types and dispatch.
//!
//! Indicator output is dense: only computable points are emitted, so a
//! series shorter than the lookback yields an empty result rather than
//! zero- or null-filled warm-up entries. Callers must treat absent points
//! as "not yet computable".

pub mod bollinger;
pub mod ema;
pub mod sma;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::IndicatorSpecError;
use super::ohlcv::BarSeries;

/// A single point in an indicator time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Indicator identity plus parameters. Serves as a HashMap key, so the
/// Bollinger multiplier is stored as an integer scaled by 100.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Bollinger { period: usize, mult_x100: u32 },
}

impl IndicatorType {
    /// Number of leading bars with no defined output.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period) => period.saturating_sub(1),
            // The SMA seed itself is not emitted.
            IndicatorType::Ema(period) => *period,
            IndicatorType::Bollinger { period, .. } => period.saturating_sub(1),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Bollinger { period, mult_x100 } => {
                let mult = *mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}

impl FromStr for IndicatorType {
    type Err = IndicatorSpecError;

    /// Parses CLI specs of the form `sma:20`, `ema:12`, `bollinger:20:2.0`
    /// (`bb` is accepted as shorthand).
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| IndicatorSpecError {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().to_lowercase();

        let period: usize = parts
            .next()
            .ok_or_else(|| err("missing period"))?
            .parse()
            .map_err(|_| err("period must be a positive integer"))?;
        if period == 0 {
            return Err(err("period must be at least 1"));
        }

        let indicator = match name.as_str() {
            "sma" => IndicatorType::Sma(period),
            "ema" => IndicatorType::Ema(period),
            "bollinger" | "bb" => {
                let mult = match parts.next() {
                    Some(raw) => raw
                        .parse::<f64>()
                        .ok()
                        .filter(|m| m.is_finite() && *m > 0.0)
                        .ok_or_else(|| err("multiplier must be a positive number"))?,
                    None => 2.0,
                };
                IndicatorType::Bollinger {
                    period,
                    mult_x100: (mult * 100.0).round() as u32,
                }
            }
            _ => return Err(err("unknown indicator (expected sma, ema or bollinger)")),
        };

        if parts.next().is_some() {
            return Err(err("too many parameters"));
        }
        Ok(indicator)
    }
}

/// A dense time series of scalar indicator values.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub points: Vec<IndicatorPoint>,
}

/// A volatility envelope: three parallel point series aligned by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSet {
    pub indicator_type: IndicatorType,
    pub upper: Vec<IndicatorPoint>,
    pub middle: Vec<IndicatorPoint>,
    pub lower: Vec<IndicatorPoint>,
}

/// Tagged indicator output, one variant per output shape.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    Series(IndicatorSeries),
    Bands(BandSet),
}

impl IndicatorOutput {
    pub fn indicator_type(&self) -> &IndicatorType {
        match self {
            IndicatorOutput::Series(s) => &s.indicator_type,
            IndicatorOutput::Bands(b) => &b.indicator_type,
        }
    }

    /// Number of emitted points (per band for envelopes).
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Series(s) => s.points.len(),
            IndicatorOutput::Bands(b) => b.middle.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute one indicator over a validated series.
pub fn compute(series: &BarSeries, indicator_type: &IndicatorType) -> IndicatorOutput {
    match indicator_type {
        IndicatorType::Sma(period) => IndicatorOutput::Series(sma::calculate_sma(series, *period)),
        IndicatorType::Ema(period) => IndicatorOutput::Series(ema::calculate_ema(series, *period)),
        IndicatorType::Bollinger { period, mult_x100 } => {
            IndicatorOutput::Bands(bollinger::calculate_bollinger(series, *period, *mult_x100))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Ema(12).to_string(), "EMA(12)");
        assert_eq!(
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 200
            }
            .to_string(),
            "BOLLINGER(20,2)"
        );
    }

    #[test]
    fn parse_sma_spec() {
        let ty: IndicatorType = "sma:20".parse().unwrap();
        assert_eq!(ty, IndicatorType::Sma(20));
    }

    #[test]
    fn parse_ema_spec() {
        let ty: IndicatorType = "ema:12".parse().unwrap();
        assert_eq!(ty, IndicatorType::Ema(12));
    }

    #[test]
    fn parse_bollinger_spec_with_multiplier() {
        let ty: IndicatorType = "bollinger:20:2.5".parse().unwrap();
        assert_eq!(
            ty,
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 250
            }
        );
    }

    #[test]
    fn parse_bollinger_shorthand_defaults_multiplier() {
        let ty: IndicatorType = "bb:20".parse().unwrap();
        assert_eq!(
            ty,
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 200
            }
        );
    }

    #[test]
    fn parse_spec_case_insensitive() {
        let ty: IndicatorType = "SMA:50".parse().unwrap();
        assert_eq!(ty, IndicatorType::Sma(50));
    }

    #[test]
    fn parse_spec_rejects_unknown_name() {
        let err = "rsi:14".parse::<IndicatorType>().unwrap_err();
        assert!(err.reason.contains("unknown indicator"));
    }

    #[test]
    fn parse_spec_rejects_missing_period() {
        assert!("sma".parse::<IndicatorType>().is_err());
    }

    #[test]
    fn parse_spec_rejects_zero_period() {
        assert!("sma:0".parse::<IndicatorType>().is_err());
    }

    #[test]
    fn parse_spec_rejects_trailing_parts() {
        assert!("sma:20:3".parse::<IndicatorType>().is_err());
    }

    #[test]
    fn parse_spec_rejects_bad_multiplier() {
        assert!("bollinger:20:-1".parse::<IndicatorType>().is_err());
        assert!("bollinger:20:abc".parse::<IndicatorType>().is_err());
    }

    #[test]
    fn warmup_offsets() {
        assert_eq!(IndicatorType::Sma(20).warmup(), 19);
        assert_eq!(IndicatorType::Ema(12).warmup(), 12);
        assert_eq!(
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 200
            }
            .warmup(),
            19
        );
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IndicatorType::Sma(20), "sma20");
        map.insert(IndicatorType::Ema(20), "ema20");

        assert_eq!(map.get(&IndicatorType::Sma(20)), Some(&"sma20"));
        assert_eq!(map.get(&IndicatorType::Ema(20)), Some(&"ema20"));
        assert_eq!(map.get(&IndicatorType::Sma(50)), None);
    }
}
