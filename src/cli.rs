//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{
    DEFAULT_BB_STD, DEFAULT_BB_WINDOW, DEFAULT_LONG_WINDOW, DEFAULT_RSI_PERIOD,
    DEFAULT_SHORT_WINDOW, StrategySpec, run_backtest,
};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::error::BackcastError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "backcast", about = "Trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, symbol.as_deref(), output.as_ref())
            }
        }
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Validate { config } => run_validate(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Read the strategy selection from `[strategy]`, falling back to the
/// documented defaults for any window parameter left unset.
pub fn build_strategy_spec(config: &dyn ConfigPort) -> Result<StrategySpec, BackcastError> {
    let name = match config.get_string("strategy", "name") {
        Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
        _ => {
            return Err(BackcastError::ConfigMissing {
                section: "strategy".to_string(),
                key: "name".to_string(),
            });
        }
    };

    match name.as_str() {
        "buy_hold" => Ok(StrategySpec::BuyHold),
        "ma_crossover" => Ok(StrategySpec::MaCrossover {
            short_window: config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64)
                as usize,
            long_window: config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64)
                as usize,
        }),
        "rsi" => Ok(StrategySpec::Rsi {
            period: config.get_int("strategy", "rsi_period", DEFAULT_RSI_PERIOD as i64) as usize,
        }),
        "bollinger" => Ok(StrategySpec::Bollinger {
            window: config.get_int("strategy", "bb_window", DEFAULT_BB_WINDOW as i64) as usize,
            num_std: config.get_double("strategy", "bb_std", DEFAULT_BB_STD),
        }),
        _ => Err(BackcastError::UnknownStrategy { name }),
    }
}

/// Read the backtest date range from `[backtest]`.
pub fn build_date_range(config: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), BackcastError> {
    let start_str =
        config
            .get_string("backtest", "start_date")
            .ok_or_else(|| BackcastError::ConfigMissing {
                section: "backtest".into(),
                key: "start_date".into(),
            })?;
    let end_str =
        config
            .get_string("backtest", "end_date")
            .ok_or_else(|| BackcastError::ConfigMissing {
                section: "backtest".into(),
                key: "end_date".into(),
            })?;

    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        BackcastError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;
    let end_date = NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
        BackcastError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    Ok((start_date, end_date))
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    if let Some(s) = symbol_override {
        return Some(s.trim().to_uppercase());
    }

    config
        .get_string("backtest", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

fn data_dir(config: &dyn ConfigPort) -> Result<PathBuf, BackcastError> {
    config
        .get_string("data", "path")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| BackcastError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

fn fmt_metric(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn run_backtest_command(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_override: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Stage 2: Validate
    if let Err(e) = validate_backtest_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build the run parameters
    let spec = match build_strategy_spec(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start_date, end_date) = match build_date_range(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let symbol = match resolve_symbol(symbol_override, &config) {
        Some(s) => s,
        None => {
            eprintln!("error: symbol is required (use --symbol or set in config)");
            return ExitCode::from(2);
        }
    };

    let base_path = match data_dir(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Fetch data
    eprintln!(
        "Fetching {} from {} ({} to {})",
        symbol,
        base_path.display(),
        start_date,
        end_date
    );
    let data_port = CsvAdapter::new(base_path);
    let series = match data_port.fetch_series(&symbol, start_date, end_date) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} bars loaded", series.len());

    // Stage 5: Run
    eprintln!("Running backtest: {}", spec);
    let result = match run_backtest(&spec, &series) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Console summary to stderr
    eprintln!("\n=== Results: {} ===", result.strategy_label);
    eprintln!("Returns (%):      {}", fmt_metric(result.returns_pct));
    eprintln!(
        "Volatility (%):   {}",
        fmt_metric(result.metrics.volatility_pct)
    );
    eprintln!(
        "Sharpe Ratio:     {}",
        fmt_metric(result.metrics.sharpe_ratio)
    );
    eprintln!(
        "Max Drawdown (%): {}",
        fmt_metric(result.metrics.max_drawdown_pct)
    );
    eprintln!("Trades:           {}", result.trade_log.len());

    // Stage 7: Optional report file
    let output = output_override
        .map(|p| p.display().to_string())
        .or_else(|| config.get_string("report", "output"));

    if let Some(output) = output {
        let include_signals = config.get_bool("report", "include_signals", false);
        let report_port = TextReportAdapter::new(include_signals);
        match report_port.write(&result, &output) {
            Ok(()) => eprintln!("\nReport written to: {}", output),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let spec = match build_strategy_spec(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start_date, end_date) = match build_date_range(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nResolved backtest:");
    eprintln!("  strategy: {}", spec);
    if let Some(symbol) = resolve_symbol(None, &config) {
        eprintln!("  symbol:   {}", symbol);
    }
    eprintln!("  range:    {} to {}", start_date, end_date);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let base_path = match data_dir(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = CsvAdapter::new(base_path.clone());
    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", base_path.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let spec = match build_strategy_spec(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("  strategy: {}", spec);
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(symbol_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let base_path = match data_dir(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = CsvAdapter::new(base_path);

    let symbols = match resolve_symbol(symbol_override, &config) {
        Some(s) => vec![s],
        None => match adapter.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for symbol in &symbols {
        match adapter.data_range(symbol) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", symbol);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", symbol, e);
            }
        }
    }
    ExitCode::SUCCESS
}
