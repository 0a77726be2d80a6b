//! Full risk assessment: sizing plus risk level, metrics and advisory text.
//!
//! This is the shape the risk-assessment route serializes; field names on
//! the wire are camelCase (`positionSizing`, `riskLevel`, `riskMetrics`,
//! `scenarioAnalysis`, `warnings`, `advice`, `capitalPreservation`).

use serde::Serialize;

use super::error::InvalidInputError;
use super::sizing::{
    compute_sizing, EngineConfig, PositionSizing, RiskThresholds, ScenarioAnalysis, SizingRequest,
};

/// Coarse classification of how aggressive a sized trade is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Stop distance under 3% of entry is conservative, under 8% moderate,
    /// anything wider aggressive. Breaching the concentration threshold
    /// bumps the level one step.
    pub fn classify(stop_distance_pct: f64, position_pct: f64, thresholds: &RiskThresholds) -> Self {
        let base = if stop_distance_pct < 3.0 {
            RiskLevel::Conservative
        } else if stop_distance_pct < 8.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Aggressive
        };

        if position_pct > thresholds.max_concentration_pct {
            match base {
                RiskLevel::Conservative => RiskLevel::Moderate,
                _ => RiskLevel::Aggressive,
            }
        } else {
            base
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Conservative => "conservative",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Aggressive => "aggressive",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub risk_reward_ratio: f64,
    pub probability_of_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub position_sizing: PositionSizing,
    pub risk_level: RiskLevel,
    pub risk_metrics: RiskMetrics,
    pub scenario_analysis: ScenarioAnalysis,
    pub warnings: Vec<String>,
    pub advice: Vec<String>,
    pub capital_preservation: Vec<String>,
}

impl RiskAssessment {
    pub fn build(
        request: &SizingRequest,
        config: &EngineConfig,
    ) -> Result<Self, InvalidInputError> {
        let report = compute_sizing(request, config)?;

        let risk_level = RiskLevel::classify(
            report.sizing.stop_loss_distance.percentage,
            report.sizing.position_percentage,
            &config.thresholds,
        );

        let risk_metrics = RiskMetrics {
            risk_reward_ratio: config.scenario.best_case_multiple,
            probability_of_profit: config.scenario.win_probability,
        };

        let advice = build_advice(request, &report.sizing, risk_level, &config.thresholds);
        let capital_preservation = build_capital_preservation(request, &report.sizing);

        Ok(RiskAssessment {
            position_sizing: report.sizing,
            risk_level,
            risk_metrics,
            scenario_analysis: report.scenarios,
            warnings: report.warnings,
            advice,
            capital_preservation,
        })
    }
}

fn build_advice(
    request: &SizingRequest,
    sizing: &PositionSizing,
    risk_level: RiskLevel,
    thresholds: &RiskThresholds,
) -> Vec<String> {
    let mut advice = Vec::new();

    if sizing.recommended_shares == 0 {
        advice.push(
            "No position fits these inputs; free up cash, tighten the stop, or raise the risk budget"
                .to_string(),
        );
        return advice;
    }

    let risk_limit_pct = request.risk_fraction * 100.0;
    if sizing.risk_percentage <= risk_limit_pct + thresholds.risk_tolerance_pct {
        advice.push(format!(
            "Risk of ${:.2} stays within the {:.1}% per-trade budget",
            sizing.risk_amount, risk_limit_pct
        ));
    }

    if sizing.position_percentage > thresholds.max_concentration_pct {
        advice.push(format!(
            "Scale in with partial fills to stay under {:.0}% of capital in one name",
            thresholds.max_concentration_pct
        ));
    }

    if risk_level == RiskLevel::Aggressive {
        advice.push(format!(
            "Stop is {:.1}% away from entry; consider a closer technical stop",
            sizing.stop_loss_distance.percentage
        ));
    }

    advice
}

fn build_capital_preservation(request: &SizingRequest, sizing: &PositionSizing) -> Vec<String> {
    let mut notes = vec![format!(
        "A full stop-out loses ${:.2} ({:.2}% of capital)",
        sizing.risk_amount, sizing.risk_percentage
    )];

    let per_trade = sizing.risk_amount / request.capital;
    if per_trade > 0.0 {
        let five_losses_pct = (1.0 - (1.0 - per_trade).powi(5)) * 100.0;
        notes.push(format!(
            "Five consecutive stop-outs would draw capital down about {:.1}%",
            five_losses_pct
        ));
    }

    notes.push(format!(
        "Cash remaining after entry: ${:.2}",
        request.available_cash - sizing.recommended_dollar_amount
    ));

    notes
}
