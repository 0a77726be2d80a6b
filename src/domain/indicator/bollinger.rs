//! Bollinger Bands indicator.
//!
//! Middle band is SMA(n); upper/lower are middle +/- multiplier * sigma,
//! where sigma is the population standard deviation of the window
//! (divide by n, not n-1). All three bands share timestamps and the
//! SMA warm-up offset of n-1 bars.

use crate::domain::indicator::{BandSet, IndicatorPoint, IndicatorType};
use crate::domain::ohlcv::BarSeries;

pub fn calculate_bollinger(series: &BarSeries, period: usize, mult_x100: u32) -> BandSet {
    let bars = series.bars();
    let indicator_type = IndicatorType::Bollinger { period, mult_x100 };
    let mult = mult_x100 as f64 / 100.0;

    let mut upper = Vec::new();
    let mut middle = Vec::new();
    let mut lower = Vec::new();

    if period == 0 || bars.len() < period {
        return BandSet {
            indicator_type,
            upper,
            middle,
            lower,
        };
    }

    let count = bars.len() - period + 1;
    upper.reserve(count);
    middle.reserve(count);
    lower.reserve(count);

    for i in (period - 1)..bars.len() {
        let window = &bars[i + 1 - period..=i];
        let timestamp = bars[i].timestamp;

        let mean: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        let variance: f64 = window
            .iter()
            .map(|b| {
                let diff = b.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        upper.push(IndicatorPoint {
            timestamp,
            value: mean + mult * stddev,
        });
        middle.push(IndicatorPoint {
            timestamp,
            value: mean,
        });
        lower.push(IndicatorPoint {
            timestamp,
            value: mean - mult * stddev,
        });
    }

    BandSet {
        indicator_type,
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::sma::calculate_sma;
    use crate::domain::ohlcv::OhlcvBar;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Utc};

    fn ts(i: usize) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + i as i64 * 86_400, 0).unwrap()
    }

    fn make_series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: "TEST".into(),
                timestamp: ts(i),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect();
        BarSeries::new(bars).unwrap()
    }

    #[test]
    fn bollinger_basic_calculation() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let bands = calculate_bollinger(&series, 3, 200);

        assert_eq!(bands.middle.len(), 1);

        let mean = 20.0;
        let variance = ((10.0_f64 - mean).powi(2)
            + (20.0_f64 - mean).powi(2)
            + (30.0_f64 - mean).powi(2))
            / 3.0;
        let stddev = variance.sqrt();

        assert_relative_eq!(bands.middle[0].value, mean, max_relative = 1e-12);
        assert_relative_eq!(
            bands.upper[0].value,
            mean + 2.0 * stddev,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            bands.lower[0].value,
            mean - 2.0 * stddev,
            max_relative = 1e-12
        );
    }

    #[test]
    fn bollinger_middle_equals_sma() {
        let series = make_series(&[10.0, 12.0, 11.0, 14.0, 13.0, 16.0, 15.0]);
        let bands = calculate_bollinger(&series, 3, 200);
        let sma = calculate_sma(&series, 3);

        assert_eq!(bands.middle.len(), sma.points.len());
        for (band_point, sma_point) in bands.middle.iter().zip(&sma.points) {
            assert_eq!(band_point.timestamp, sma_point.timestamp);
            assert_relative_eq!(band_point.value, sma_point.value, max_relative = 1e-12);
        }
    }

    #[test]
    fn bollinger_bands_share_timestamps() {
        let series = make_series(&[10.0, 12.0, 11.0, 14.0, 13.0]);
        let bands = calculate_bollinger(&series, 3, 200);

        assert_eq!(bands.upper.len(), bands.middle.len());
        assert_eq!(bands.lower.len(), bands.middle.len());
        for i in 0..bands.middle.len() {
            assert_eq!(bands.upper[i].timestamp, bands.middle[i].timestamp);
            assert_eq!(bands.lower[i].timestamp, bands.middle[i].timestamp);
        }
        assert_eq!(bands.middle[0].timestamp, ts(2));
    }

    #[test]
    fn bollinger_constant_prices_collapse_bands() {
        let series = make_series(&[100.0, 100.0, 100.0, 100.0]);
        let bands = calculate_bollinger(&series, 3, 200);

        for i in 0..bands.middle.len() {
            assert_relative_eq!(bands.upper[i].value, 100.0);
            assert_relative_eq!(bands.middle[i].value, 100.0);
            assert_relative_eq!(bands.lower[i].value, 100.0);
        }
    }

    #[test]
    fn bollinger_symmetry_around_middle() {
        let series = make_series(&[10.0, 20.0, 30.0, 25.0, 15.0]);
        let bands = calculate_bollinger(&series, 3, 200);

        for i in 0..bands.middle.len() {
            let up = bands.upper[i].value - bands.middle[i].value;
            let down = bands.middle[i].value - bands.lower[i].value;
            assert_relative_eq!(up, down, max_relative = 1e-12);
        }
    }

    #[test]
    fn bollinger_multiplier_scales_width() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let narrow = calculate_bollinger(&series, 3, 100);
        let wide = calculate_bollinger(&series, 3, 200);

        let narrow_width = narrow.upper[0].value - narrow.lower[0].value;
        let wide_width = wide.upper[0].value - wide.lower[0].value;
        assert_relative_eq!(wide_width, 2.0 * narrow_width, max_relative = 1e-12);
    }

    #[test]
    fn bollinger_short_series_yields_no_points() {
        let series = make_series(&[10.0, 20.0]);
        let bands = calculate_bollinger(&series, 3, 200);
        assert!(bands.upper.is_empty());
        assert!(bands.middle.is_empty());
        assert!(bands.lower.is_empty());
    }

    #[test]
    fn bollinger_period_zero_yields_no_points() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        assert!(calculate_bollinger(&series, 0, 200).middle.is_empty());
    }

    #[test]
    fn bollinger_indicator_type() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let bands = calculate_bollinger(&series, 20, 200);
        assert_eq!(
            bands.indicator_type,
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 200
            }
        );
    }
}
