//! JSON report adapter.
//!
//! Renders indicator output and risk assessments as pretty-printed JSON.
//! Timestamps are emitted as Unix seconds, matching the chart's native
//! time format.

use serde_json::json;

use crate::domain::assessment::RiskAssessment;
use crate::domain::error::StockbenchError;
use crate::domain::indicator::IndicatorOutput;
use crate::ports::report_port::ReportPort;

#[derive(Default)]
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for JsonReportAdapter {
    fn render_indicators(
        &self,
        symbol: &str,
        outputs: &[IndicatorOutput],
    ) -> Result<String, StockbenchError> {
        let indicators: Vec<serde_json::Value> = outputs
            .iter()
            .map(|output| match output {
                IndicatorOutput::Series(series) => json!({
                    "indicator": series.indicator_type.to_string(),
                    "kind": "series",
                    "points": series.points,
                }),
                IndicatorOutput::Bands(bands) => json!({
                    "indicator": bands.indicator_type.to_string(),
                    "kind": "bands",
                    "upper": bands.upper,
                    "middle": bands.middle,
                    "lower": bands.lower,
                }),
            })
            .collect();

        let document = json!({
            "symbol": symbol,
            "indicators": indicators,
        });

        serde_json::to_string_pretty(&document).map_err(|e| StockbenchError::Report {
            reason: e.to_string(),
        })
    }

    fn render_assessment(&self, assessment: &RiskAssessment) -> Result<String, StockbenchError> {
        serde_json::to_string_pretty(assessment).map_err(|e| StockbenchError::Report {
            reason: e.to_string(),
        })
    }
}
