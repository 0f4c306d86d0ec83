//! Configuration validation.
//!
//! Checks all config fields before a backtest runs. Strategy parameters
//! are only checked for the strategy actually selected; the others fall
//! back to defaults and are ignored.

use crate::domain::backtest::{
    DEFAULT_BB_STD, DEFAULT_BB_WINDOW, DEFAULT_LONG_WINDOW, DEFAULT_RSI_PERIOD,
    DEFAULT_SHORT_WINDOW,
};
use crate::domain::error::BackcastError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), BackcastError> {
    validate_data_path(config)?;
    validate_symbol(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), BackcastError> {
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
        "buy_hold" => Ok(()),
        "ma_crossover" => {
            validate_window(config, "short_window", DEFAULT_SHORT_WINDOW)?;
            validate_window(config, "long_window", DEFAULT_LONG_WINDOW)?;
            Ok(())
        }
        "rsi" => validate_window(config, "rsi_period", DEFAULT_RSI_PERIOD),
        "bollinger" => {
            validate_window(config, "bb_window", DEFAULT_BB_WINDOW)?;
            validate_bb_std(config)?;
            Ok(())
        }
        _ => Err(BackcastError::UnknownStrategy { name }),
    }
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), BackcastError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BackcastError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), BackcastError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BackcastError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), BackcastError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(BackcastError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, BackcastError> {
    match value {
        None => Err(BackcastError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| BackcastError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_window(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<(), BackcastError> {
    let value = config.get_int("strategy", key, default as i64);
    if value < 1 {
        return Err(BackcastError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{} must be at least 1", key),
        });
    }
    Ok(())
}

fn validate_bb_std(config: &dyn ConfigPort) -> Result<(), BackcastError> {
    let value = config.get_double("strategy", "bb_std", DEFAULT_BB_STD);
    if value <= 0.0 {
        return Err(BackcastError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "bb_std".to_string(),
            reason: "bb_std must be positive".to_string(),
        });
    }
    Ok(())
}
