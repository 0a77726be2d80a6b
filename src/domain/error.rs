//! Domain error types.

/// Fatal input errors for the indicator & risk engine.
///
/// These are the only conditions the engine rejects. Short bar series are
/// not errors (indicators just produce no points) and advisory conditions
/// are reported as warning strings on the result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("stop-loss equals entry price: cannot size a position with no stop distance")]
    ZeroStopDistance,

    #[error("capital must be positive, got {value}")]
    NonPositiveCapital { value: f64 },

    #[error("entry price must be positive, got {value}")]
    NonPositiveEntryPrice { value: f64 },

    #[error("stop-loss price must be positive, got {value}")]
    NonPositiveStopLoss { value: f64 },

    #[error("risk per trade must be in (0, 1], got {value}")]
    RiskFractionOutOfRange { value: f64 },

    #[error("available cash must be non-negative, got {value}")]
    NegativeAvailableCash { value: f64 },

    #[error("bar series is not strictly increasing by timestamp at index {index}")]
    NonMonotonicSeries { index: usize },

    #[error("malformed bar at index {index}: {reason}")]
    MalformedBar { index: usize, reason: String },
}

/// A parse error for indicator specs given on the command line.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid indicator spec '{spec}': {reason}")]
pub struct IndicatorSpecError {
    pub spec: String,
    pub reason: String,
}

/// Top-level error type for stockbench.
#[derive(Debug, thiserror::Error)]
pub enum StockbenchError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    IndicatorSpec(#[from] IndicatorSpecError),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockbenchError> for std::process::ExitCode {
    fn from(err: &StockbenchError) -> Self {
        let code: u8 = match err {
            StockbenchError::Io(_) | StockbenchError::Report { .. } => 1,
            StockbenchError::ConfigParse { .. }
            | StockbenchError::ConfigMissing { .. }
            | StockbenchError::ConfigInvalid { .. } => 2,
            StockbenchError::Data { .. } => 3,
            StockbenchError::InvalidInput(_) | StockbenchError::IndicatorSpec(_) => 4,
            StockbenchError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
