#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use stockbench::domain::error::StockbenchError;
pub use stockbench::domain::ohlcv::OhlcvBar;
use stockbench::ports::data_port::DataPort;

pub fn ts(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + i as i64 * 86_400, 0).unwrap()
}

pub fn make_bar(i: usize, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: "TEST".into(),
        timestamp: ts(i),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000.0,
    }
}

pub fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i, close))
        .collect()
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StockbenchError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockbenchError::Data {
                reason: reason.clone(),
            });
        }
        let mut bars = self.data.get(symbol).cloned().unwrap_or_default();
        bars.retain(|bar| {
            let date = bar.timestamp.date_naive();
            start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
        });
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockbenchError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, StockbenchError> {
        let bars = match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => bars,
            _ => return Ok(None),
        };
        Ok(Some((
            bars[0].timestamp,
            bars[bars.len() - 1].timestamp,
            bars.len(),
        )))
    }
}
