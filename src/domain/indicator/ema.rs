//! Exponential Moving Average indicator.
//!
//! alpha = 2/(n+1), seeded with the SMA of the first n closes, then
//! ema[i] = (close[i] - ema[i-1]) * alpha + ema[i-1].
//!
//! The seed itself is not emitted: output starts at index n, one point
//! fewer than SMA(n) over the same series.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::BarSeries;

pub fn calculate_ema(series: &BarSeries, period: usize) -> IndicatorSeries {
    let bars = series.bars();
    let mut points = Vec::new();

    if period == 0 || bars.len() <= period {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(period),
            points,
        };
    }

    points.reserve(bars.len() - period);

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed: f64 = bars[..period].iter().map(|b| b.close).sum::<f64>() / period as f64;

    let mut ema = seed;
    for bar in &bars[period..] {
        ema = (bar.close - ema) * alpha + ema;
        points.push(IndicatorPoint {
            timestamp: bar.timestamp,
            value: ema,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        points,
    }
}
