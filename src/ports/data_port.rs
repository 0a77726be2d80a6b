//! Bar data access port trait.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::error::StockbenchError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    /// Fetch bars for a symbol, optionally bounded by calendar dates
    /// (inclusive on both ends), sorted ascending by timestamp.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StockbenchError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockbenchError>;

    /// First timestamp, last timestamp and bar count for a symbol, or
    /// `None` when no data is stored for it.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, StockbenchError>;
}
