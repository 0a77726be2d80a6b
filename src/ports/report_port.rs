//! Report rendering port trait.

use crate::domain::assessment::RiskAssessment;
use crate::domain::error::StockbenchError;
use crate::domain::indicator::IndicatorOutput;

/// Port for rendering engine output. Renderers return the finished
/// document; the caller decides whether it goes to stdout or a file.
pub trait ReportPort {
    fn render_indicators(
        &self,
        symbol: &str,
        outputs: &[IndicatorOutput],
    ) -> Result<String, StockbenchError>;

    fn render_assessment(&self, assessment: &RiskAssessment) -> Result<String, StockbenchError>;
}
