//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::assessment::RiskAssessment;
use crate::domain::config_validation::validate_engine_config;
use crate::domain::error::StockbenchError;
use crate::domain::indicator::{self, IndicatorOutput, IndicatorType};
use crate::domain::ohlcv::BarSeries;
use crate::domain::sizing::{EngineConfig, RiskThresholds, ScenarioConfig, SizingRequest};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockbench", about = "Stock indicator and position-risk toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators over a symbol's bar history
    Analyze {
        /// Directory of per-symbol CSV bar files
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        symbol: String,
        /// Indicator spec, repeatable (sma:20, ema:12, bollinger:20:2.0)
        #[arg(short, long = "indicator")]
        indicators: Vec<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Size a position from capital, risk budget, entry and stop
    Size {
        #[arg(long)]
        capital: f64,
        /// Risk per trade as a fraction of capital (defaults to config)
        #[arg(long)]
        risk: Option<f64>,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        /// Cash available to deploy (defaults to capital)
        #[arg(long)]
        cash: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show stored data range for a symbol (or all symbols)
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            data,
            symbol,
            indicators,
            start,
            end,
            config,
            output,
        } => run_analyze(
            data.as_ref(),
            &symbol,
            &indicators,
            start,
            end,
            config.as_ref(),
            output.as_ref(),
        ),
        Command::Size {
            capital,
            risk,
            entry,
            stop,
            cash,
            config,
            output,
        } => run_size(capital, risk, entry, stop, cash, config.as_ref(), output.as_ref()),
        Command::Info { data, symbol } => run_info(&data, symbol.as_deref()),
        Command::ListSymbols { data } => run_list_symbols(&data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockbenchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the engine configuration from an INI adapter, falling back to the
/// documented defaults for anything unset.
pub fn build_engine_config(adapter: &dyn ConfigPort) -> EngineConfig {
    let scenario_defaults = ScenarioConfig::default();
    let threshold_defaults = RiskThresholds::default();

    EngineConfig {
        scenario: ScenarioConfig {
            best_case_multiple: adapter.get_double(
                "scenario",
                "best_case_multiple",
                scenario_defaults.best_case_multiple,
            ),
            expected_case_multiple: adapter.get_double(
                "scenario",
                "expected_case_multiple",
                scenario_defaults.expected_case_multiple,
            ),
            win_probability: adapter.get_double(
                "scenario",
                "win_probability",
                scenario_defaults.win_probability,
            ),
        },
        thresholds: RiskThresholds {
            max_concentration_pct: adapter.get_double(
                "sizing",
                "max_concentration_pct",
                threshold_defaults.max_concentration_pct,
            ),
            risk_tolerance_pct: adapter.get_double(
                "sizing",
                "risk_tolerance_pct",
                threshold_defaults.risk_tolerance_pct,
            ),
        },
    }
}

/// Assemble a sizing request from CLI flags, with the risk fraction and
/// available cash falling back to config / capital respectively.
pub fn build_sizing_request(
    capital: f64,
    risk: Option<f64>,
    entry: f64,
    stop: f64,
    cash: Option<f64>,
    adapter: Option<&dyn ConfigPort>,
) -> SizingRequest {
    let risk_fraction = risk.unwrap_or_else(|| {
        adapter
            .map(|a| a.get_double("sizing", "risk_per_trade", 0.02))
            .unwrap_or(0.02)
    });

    SizingRequest {
        capital,
        risk_fraction,
        entry_price: entry,
        stop_loss: stop,
        available_cash: cash.unwrap_or(capital),
    }
}

/// Parse CLI indicator specs, defaulting to the standard chart overlays
/// when none were requested.
pub fn parse_indicator_specs(specs: &[String]) -> Result<Vec<IndicatorType>, StockbenchError> {
    if specs.is_empty() {
        return Ok(vec![
            IndicatorType::Sma(20),
            IndicatorType::Ema(20),
            IndicatorType::Bollinger {
                period: 20,
                mult_x100: 200,
            },
        ]);
    }

    specs
        .iter()
        .map(|spec| spec.parse::<IndicatorType>().map_err(StockbenchError::from))
        .collect()
}

/// Fetch bars for a symbol, validate them and compute every requested
/// indicator. Shared by the `analyze` command and the integration tests.
pub fn run_analysis(
    data_port: &dyn DataPort,
    symbol: &str,
    indicator_types: &[IndicatorType],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<IndicatorOutput>, StockbenchError> {
    let bars = data_port.fetch_ohlcv(symbol, start, end)?;
    if bars.is_empty() {
        return Err(StockbenchError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let series = BarSeries::new(bars)?;
    Ok(indicator_types
        .iter()
        .map(|ty| indicator::compute(&series, ty))
        .collect())
}

fn resolve_data_dir(
    data_override: Option<&PathBuf>,
    adapter: Option<&FileConfigAdapter>,
) -> Option<PathBuf> {
    if let Some(dir) = data_override {
        return Some(dir.clone());
    }
    adapter
        .and_then(|a| a.get_string("data", "path"))
        .map(PathBuf::from)
}

fn emit_report(rendered: &str, output: Option<&PathBuf>) -> ExitCode {
    match output {
        Some(path) => match fs::write(path, rendered) {
            Ok(()) => {
                eprintln!("Report written to: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                ExitCode::from(1)
            }
        },
        None => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
    }
}

fn run_analyze(
    data_override: Option<&PathBuf>,
    symbol: &str,
    specs: &[String],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    config_path: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config_adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    let data_dir = match resolve_data_dir(data_override, config_adapter.as_ref()) {
        Some(dir) => dir,
        None => {
            eprintln!("error: data directory is required (use --data or set [data] path)");
            return ExitCode::from(2);
        }
    };

    let indicator_types = match parse_indicator_specs(specs) {
        Ok(types) => types,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = symbol.to_uppercase();
    let data_port = CsvAdapter::new(data_dir);

    eprintln!("Analyzing {}...", symbol);
    let outputs = match run_analysis(&data_port, &symbol, &indicator_types, start, end) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for out in &outputs {
        eprintln!(
            "  {}: {} points (warm-up {} bars)",
            out.indicator_type(),
            out.len(),
            out.indicator_type().warmup(),
        );
    }

    let report_port = JsonReportAdapter::new();
    let rendered = match report_port.render_indicators(&symbol, &outputs) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    emit_report(&rendered, output)
}

fn run_size(
    capital: f64,
    risk: Option<f64>,
    entry: f64,
    stop: f64,
    cash: Option<f64>,
    config_path: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config_adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            if let Err(e) = validate_engine_config(&adapter) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            Some(adapter)
        }
        None => None,
    };

    let engine_config = config_adapter
        .as_ref()
        .map(|a| build_engine_config(a))
        .unwrap_or_default();

    let request = build_sizing_request(
        capital,
        risk,
        entry,
        stop,
        cash,
        config_adapter.as_ref().map(|a| a as &dyn ConfigPort),
    );

    let assessment = match RiskAssessment::build(&request, &engine_config) {
        Ok(a) => a,
        Err(e) => {
            let err = StockbenchError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let sizing = &assessment.position_sizing;
    eprintln!(
        "{} shares at ${:.2} (${:.2}, {:.1}% of capital), risking ${:.2} ({:.2}%)",
        sizing.recommended_shares,
        request.entry_price,
        sizing.recommended_dollar_amount,
        sizing.position_percentage,
        sizing.risk_amount,
        sizing.risk_percentage,
    );
    for warning in &assessment.warnings {
        eprintln!("warning: {warning}");
    }

    let report_port = JsonReportAdapter::new();
    let rendered = match report_port.render_assessment(&assessment) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    emit_report(&rendered, output)
}

fn run_info(data_dir: &PathBuf, symbol: Option<&str>) -> ExitCode {
    let data_port = CsvAdapter::new(data_dir.clone());

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match data_port.list_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for s in &symbols {
        match data_port.get_data_range(s) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} bars, {} to {}", s, count, first.date_naive(), last.date_naive());
            }
            Ok(None) => {
                eprintln!("{}: no data found", s);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", s, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(data_dir: &PathBuf) -> ExitCode {
    let data_port = CsvAdapter::new(data_dir.clone());

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", data_dir.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}
