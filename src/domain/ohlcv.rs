//! OHLCV bar and validated series representation.

use chrono::{DateTime, Utc};

use super::error::InvalidInputError;

/// One time-bucketed price sample. Timestamps are UTC instants and are
/// exposed as Unix seconds at serialization boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    fn check(&self, index: usize) -> Result<(), InvalidInputError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidInputError::MalformedBar {
                    index,
                    reason: format!("{name} must be a positive number, got {value}"),
                });
            }
        }
        if self.high < self.open.max(self.close) {
            return Err(InvalidInputError::MalformedBar {
                index,
                reason: format!("high {} below max(open, close)", self.high),
            });
        }
        if self.low > self.open.min(self.close) {
            return Err(InvalidInputError::MalformedBar {
                index,
                reason: format!("low {} above min(open, close)", self.low),
            });
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(InvalidInputError::MalformedBar {
                index,
                reason: format!("volume must be non-negative, got {}", self.volume),
            });
        }
        Ok(())
    }
}

/// An ordered bar sequence, strictly increasing by timestamp.
///
/// Construction validates every bar and the ordering; a `BarSeries` is the
/// sole input accepted by the indicator functions, so they never have to
/// re-check monotonicity.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    bars: Vec<OhlcvBar>,
}

impl BarSeries {
    pub fn new(bars: Vec<OhlcvBar>) -> Result<Self, InvalidInputError> {
        for (i, bar) in bars.iter().enumerate() {
            bar.check(i)?;
            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(InvalidInputError::NonMonotonicSeries { index: i });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }
}
