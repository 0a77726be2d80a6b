//! CSV file bar-data adapter.
//!
//! One file per symbol (`<SYMBOL>.csv`) with columns
//! `timestamp,open,high,low,close,volume`. Timestamps are Unix seconds;
//! a plain `YYYY-MM-DD` date is also accepted and read as midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::StockbenchError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StockbenchError> {
        if let Ok(secs) = raw.parse::<i64>() {
            return DateTime::from_timestamp(secs, 0).ok_or_else(|| StockbenchError::Data {
                reason: format!("timestamp out of range: {raw}"),
            });
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| StockbenchError::Data {
            reason: format!("invalid timestamp (expected Unix seconds or YYYY-MM-DD): {raw}"),
        })?;
        Ok(date.and_time(NaiveTime::MIN).and_utc())
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<OhlcvBar>, StockbenchError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StockbenchError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockbenchError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                timestamp: Self::parse_timestamp(field(&record, 0, "timestamp")?)?,
                open: number(&record, 1, "open")?,
                high: number(&record, 2, "high")?,
                low: number(&record, 3, "low")?,
                close: number(&record, 4, "close")?,
                volume: number(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        Ok(bars)
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    idx: usize,
    name: &str,
) -> Result<&'a str, StockbenchError> {
    record.get(idx).ok_or_else(|| StockbenchError::Data {
        reason: format!("missing {name} column"),
    })
}

fn number(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64, StockbenchError> {
    field(record, idx, name)?
        .parse()
        .map_err(|e| StockbenchError::Data {
            reason: format!("invalid {name} value: {e}"),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StockbenchError> {
        let mut bars = self.read_all(symbol)?;
        bars.retain(|bar| {
            let date = bar.timestamp.date_naive();
            start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
        });
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockbenchError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StockbenchError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StockbenchError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, StockbenchError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.timestamp, last.timestamp, bars.len())))
            }
            _ => Ok(None),
        }
    }
}
