//! Position sizing and scenario analysis.
//!
//! Pure and stateless: the same request always produces the same report,
//! so results are safe to memoize by the full input tuple.

use serde::Serialize;

use super::error::InvalidInputError;

/// A trade setup to size: account capital, risk budget, entry/stop and
/// the cash actually available to deploy.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingRequest {
    pub capital: f64,
    pub risk_fraction: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub available_cash: f64,
}

/// Scenario-analysis assumptions. Defaults mirror the reference behavior:
/// best case 3x the stop distance, expected case a 1.5x win weighted by a
/// 55% win probability, worst case a full stop-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub best_case_multiple: f64,
    pub expected_case_multiple: f64,
    pub win_probability: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            best_case_multiple: 3.0,
            expected_case_multiple: 1.5,
            win_probability: 0.55,
        }
    }
}

/// Advisory thresholds, collected in one place rather than scattered
/// through call sites. `risk_tolerance_pct` is the overshoot (in
/// percentage points) allowed before the risk warning fires.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskThresholds {
    pub max_concentration_pct: f64,
    pub risk_tolerance_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            max_concentration_pct: 25.0,
            risk_tolerance_pct: 0.01,
        }
    }
}

/// Engine-wide configuration: scenario assumptions plus advisory thresholds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub scenario: ScenarioConfig,
    pub thresholds: RiskThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossDistance {
    pub dollars: f64,
    pub percentage: f64,
}

/// The sizing numbers themselves; serialized field names match the
/// `positionSizing` object of the risk-assessment response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizing {
    pub recommended_shares: u64,
    pub recommended_dollar_amount: f64,
    pub risk_amount: f64,
    pub risk_percentage: f64,
    pub position_percentage: f64,
    pub stop_loss_distance: StopLossDistance,
}

/// One projected outcome. Percentage is relative to the deployed dollar
/// amount (zero when no position could be sized).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub dollars: f64,
    pub percentage: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAnalysis {
    pub best_case: Scenario,
    pub expected_case: Scenario,
    pub worst_case: Scenario,
}

/// Output of [`compute_sizing`]: the sizing numbers, the scenario triple
/// and any non-fatal warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingReport {
    pub sizing: PositionSizing,
    pub scenarios: ScenarioAnalysis,
    pub warnings: Vec<String>,
}

fn validate(request: &SizingRequest) -> Result<(), InvalidInputError> {
    if !request.capital.is_finite() || request.capital <= 0.0 {
        return Err(InvalidInputError::NonPositiveCapital {
            value: request.capital,
        });
    }
    if !request.entry_price.is_finite() || request.entry_price <= 0.0 {
        return Err(InvalidInputError::NonPositiveEntryPrice {
            value: request.entry_price,
        });
    }
    if !request.stop_loss.is_finite() || request.stop_loss <= 0.0 {
        return Err(InvalidInputError::NonPositiveStopLoss {
            value: request.stop_loss,
        });
    }
    if !request.risk_fraction.is_finite()
        || request.risk_fraction <= 0.0
        || request.risk_fraction > 1.0
    {
        return Err(InvalidInputError::RiskFractionOutOfRange {
            value: request.risk_fraction,
        });
    }
    if !request.available_cash.is_finite() || request.available_cash < 0.0 {
        return Err(InvalidInputError::NegativeAvailableCash {
            value: request.available_cash,
        });
    }
    if request.entry_price == request.stop_loss {
        return Err(InvalidInputError::ZeroStopDistance);
    }
    Ok(())
}

/// Size a position from a validated request.
///
/// Shares are risk-budgeted (`capital * risk_fraction / stop_distance`),
/// capped by available cash, and floored to whole shares. Degenerate
/// inputs fail; advisory conditions only append warnings.
pub fn compute_sizing(
    request: &SizingRequest,
    config: &EngineConfig,
) -> Result<SizingReport, InvalidInputError> {
    validate(request)?;

    let stop_distance = (request.entry_price - request.stop_loss).abs();
    let max_risk = request.capital * request.risk_fraction;

    let theoretical_shares = (max_risk / stop_distance).floor() as u64;
    let cash_capped_shares = (request.available_cash / request.entry_price).floor() as u64;
    let recommended_shares = theoretical_shares.min(cash_capped_shares);

    let dollar_amount = recommended_shares as f64 * request.entry_price;
    let risk_amount = recommended_shares as f64 * stop_distance;
    let risk_percentage = risk_amount / request.capital * 100.0;
    let position_percentage = dollar_amount / request.capital * 100.0;

    let sizing = PositionSizing {
        recommended_shares,
        recommended_dollar_amount: dollar_amount,
        risk_amount,
        risk_percentage,
        position_percentage,
        stop_loss_distance: StopLossDistance {
            dollars: stop_distance,
            percentage: stop_distance / request.entry_price * 100.0,
        },
    };

    let scenarios = project_scenarios(&sizing, &config.scenario);
    let warnings = collect_warnings(request, &sizing, &config.thresholds);

    Ok(SizingReport {
        sizing,
        scenarios,
        warnings,
    })
}

fn pct_of_position(dollars: f64, dollar_amount: f64) -> f64 {
    if dollar_amount > 0.0 {
        dollars / dollar_amount * 100.0
    } else {
        0.0
    }
}

fn project_scenarios(sizing: &PositionSizing, config: &ScenarioConfig) -> ScenarioAnalysis {
    let risk = sizing.risk_amount;
    let amount = sizing.recommended_dollar_amount;

    let best_dollars = risk * config.best_case_multiple;
    let win = config.win_probability;
    let expected_dollars = win * risk * config.expected_case_multiple - (1.0 - win) * risk;
    let worst_dollars = -risk;

    ScenarioAnalysis {
        best_case: Scenario {
            dollars: best_dollars,
            percentage: pct_of_position(best_dollars, amount),
            rationale: format!(
                "Price reaches {:.1}x the stop distance before the stop is hit",
                config.best_case_multiple
            ),
        },
        expected_case: Scenario {
            dollars: expected_dollars,
            percentage: pct_of_position(expected_dollars, amount),
            rationale: format!(
                "{:.0}% chance of a {:.1}x win, otherwise stopped out",
                win * 100.0,
                config.expected_case_multiple
            ),
        },
        worst_case: Scenario {
            dollars: worst_dollars,
            percentage: pct_of_position(worst_dollars, amount),
            rationale: "Stop-loss triggered at full risk".to_string(),
        },
    }
}

fn collect_warnings(
    request: &SizingRequest,
    sizing: &PositionSizing,
    thresholds: &RiskThresholds,
) -> Vec<String> {
    let mut warnings = Vec::new();

    let risk_limit_pct = request.risk_fraction * 100.0;
    if sizing.risk_percentage > risk_limit_pct + thresholds.risk_tolerance_pct {
        warnings.push(format!(
            "Risk of {:.2}% exceeds the {:.2}% per-trade limit",
            sizing.risk_percentage, risk_limit_pct
        ));
    }

    if sizing.position_percentage > thresholds.max_concentration_pct {
        warnings.push(format!(
            "Position is {:.1}% of capital, above the {:.1}% concentration limit",
            sizing.position_percentage, thresholds.max_concentration_pct
        ));
    }

    if sizing.recommended_shares == 0 {
        warnings.push("Inputs are too small to size a position; recommended size is zero".into());
    }

    warnings
}
