//! Simple Moving Average indicator.
//!
//! SMA(n) at bar i = mean of the n closes ending at i.
//! Output starts at index n-1; a series shorter than n yields no points.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::BarSeries;

pub fn calculate_sma(series: &BarSeries, period: usize) -> IndicatorSeries {
    let bars = series.bars();
    let mut points = Vec::new();

    if period == 0 || bars.len() < period {
        return IndicatorSeries {
            indicator_type: IndicatorType::Sma(period),
            points,
        };
    }

    points.reserve(bars.len() - period + 1);

    let mut sum: f64 = bars[..period].iter().map(|b| b.close).sum();
    points.push(IndicatorPoint {
        timestamp: bars[period - 1].timestamp,
        value: sum / period as f64,
    });

    for i in period..bars.len() {
        sum += bars[i].close - bars[i - period].close;
        points.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            value: sum / period as f64,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        points,
    }
}
