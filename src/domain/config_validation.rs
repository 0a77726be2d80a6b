//! Engine configuration validation.
//!
//! Checks the `[sizing]` and `[scenario]` sections before any computation
//! runs, so bad config surfaces as a config error rather than a sizing
//! failure later.

use crate::domain::error::StockbenchError;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    validate_risk_per_trade(config)?;
    validate_concentration(config)?;
    validate_risk_tolerance(config)?;
    validate_scenario(config)?;
    Ok(())
}

fn invalid(key: &str, section: &str, reason: &str) -> StockbenchError {
    StockbenchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_risk_per_trade(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let value = config.get_double("sizing", "risk_per_trade", 0.02);
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(
            "risk_per_trade",
            "sizing",
            "risk_per_trade must be in (0, 1]",
        ));
    }
    Ok(())
}

fn validate_concentration(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let value = config.get_double("sizing", "max_concentration_pct", 25.0);
    if value <= 0.0 || value > 100.0 {
        return Err(invalid(
            "max_concentration_pct",
            "sizing",
            "max_concentration_pct must be in (0, 100]",
        ));
    }
    Ok(())
}

fn validate_risk_tolerance(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let value = config.get_double("sizing", "risk_tolerance_pct", 0.01);
    if value < 0.0 {
        return Err(invalid(
            "risk_tolerance_pct",
            "sizing",
            "risk_tolerance_pct must be non-negative",
        ));
    }
    Ok(())
}

fn validate_scenario(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let best = config.get_double("scenario", "best_case_multiple", 3.0);
    if best <= 0.0 {
        return Err(invalid(
            "best_case_multiple",
            "scenario",
            "best_case_multiple must be positive",
        ));
    }

    let expected = config.get_double("scenario", "expected_case_multiple", 1.5);
    if expected <= 0.0 {
        return Err(invalid(
            "expected_case_multiple",
            "scenario",
            "expected_case_multiple must be positive",
        ));
    }

    let win = config.get_double("scenario", "win_probability", 0.55);
    if !(0.0..=1.0).contains(&win) {
        return Err(invalid(
            "win_probability",
            "scenario",
            "win_probability must be between 0 and 1",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn empty_config_passes_with_defaults() {
        let config = adapter("[sizing]\n");
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn full_valid_config_passes() {
        let config = adapter(
            r#"
[sizing]
risk_per_trade = 0.01
max_concentration_pct = 20.0
risk_tolerance_pct = 0.05

[scenario]
best_case_multiple = 2.5
expected_case_multiple = 1.2
win_probability = 0.6
"#,
        );
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn risk_per_trade_out_of_range_rejected() {
        let config = adapter("[sizing]\nrisk_per_trade = 1.5\n");
        let err = validate_engine_config(&config).unwrap_err();
        assert!(
            matches!(err, StockbenchError::ConfigInvalid { key, .. } if key == "risk_per_trade")
        );
    }

    #[test]
    fn zero_risk_per_trade_rejected() {
        let config = adapter("[sizing]\nrisk_per_trade = 0\n");
        assert!(validate_engine_config(&config).is_err());
    }

    #[test]
    fn concentration_over_100_rejected() {
        let config = adapter("[sizing]\nmax_concentration_pct = 150\n");
        let err = validate_engine_config(&config).unwrap_err();
        assert!(
            matches!(err, StockbenchError::ConfigInvalid { key, .. } if key == "max_concentration_pct")
        );
    }

    #[test]
    fn negative_tolerance_rejected() {
        let config = adapter("[sizing]\nrisk_tolerance_pct = -0.1\n");
        assert!(validate_engine_config(&config).is_err());
    }

    #[test]
    fn negative_multiple_rejected() {
        let config = adapter("[scenario]\nbest_case_multiple = -3\n");
        let err = validate_engine_config(&config).unwrap_err();
        assert!(
            matches!(err, StockbenchError::ConfigInvalid { key, .. } if key == "best_case_multiple")
        );
    }

    #[test]
    fn win_probability_out_of_range_rejected() {
        let config = adapter("[scenario]\nwin_probability = 1.2\n");
        let err = validate_engine_config(&config).unwrap_err();
        assert!(
            matches!(err, StockbenchError::ConfigInvalid { key, .. } if key == "win_probability")
        );
    }
}
