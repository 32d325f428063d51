//! Configuration validation.
//!
//! Every field is checked before an analysis runs; a bad window size or
//! tolerance is a configuration error, never a silent default.

use crate::domain::error::CryptosigError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::collections::HashSet;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), CryptosigError> {
    validate_epsilon(config)?;
    validate_windows(config, "ma_windows")?;
    validate_windows(config, "change_windows")?;
    validate_strategy_windows(config)?;
    validate_dates(config)?;
    validate_symbols(config)?;
    Ok(())
}

/// Parse a comma-separated symbol list: trimmed, upper-cased, no empty
/// tokens, no duplicates.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, CryptosigError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid("symbols", "empty token in symbol list"));
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(invalid("symbols", &format!("duplicate symbol: {symbol}")));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Parse a comma-separated window list. Windows must be >= 1.
pub fn parse_windows(key: &str, input: &str) -> Result<Vec<usize>, CryptosigError> {
    let mut windows = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        let window: usize = trimmed
            .parse()
            .map_err(|_| invalid(key, &format!("'{trimmed}' is not a window size")))?;
        if window == 0 {
            return Err(invalid(key, "window sizes must be at least 1"));
        }
        windows.push(window);
    }
    Ok(windows)
}

fn invalid(key: &str, reason: &str) -> CryptosigError {
    CryptosigError::ConfigInvalid {
        section: "analysis".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_epsilon(config: &dyn ConfigPort) -> Result<(), CryptosigError> {
    let epsilon = config.get_double("analysis", "epsilon", 0.1);
    if epsilon <= 0.0 || epsilon >= 1.0 {
        return Err(invalid("epsilon", "epsilon must be strictly between 0 and 1"));
    }
    Ok(())
}

fn validate_windows(config: &dyn ConfigPort, key: &str) -> Result<(), CryptosigError> {
    if let Some(raw) = config.get_string("analysis", key) {
        parse_windows(key, &raw)?;
    }
    Ok(())
}

fn validate_strategy_windows(config: &dyn ConfigPort) -> Result<(), CryptosigError> {
    let ma_windows = match config.get_string("analysis", "ma_windows") {
        Some(raw) => parse_windows("ma_windows", &raw)?,
        None => crate::domain::strategy::DEFAULT_MA_WINDOWS.to_vec(),
    };

    for key in ["short_window", "long_window", "bb_window"] {
        let value = config.get_int("analysis", key, default_strategy_window(key));
        if value < 1 {
            return Err(invalid(key, "window sizes must be at least 1"));
        }
        if !ma_windows.contains(&(value as usize)) {
            return Err(invalid(
                key,
                &format!("window {value} is not in ma_windows"),
            ));
        }
    }
    Ok(())
}

fn default_strategy_window(key: &str) -> i64 {
    match key {
        "short_window" => crate::domain::strategy::DEFAULT_SHORT_WINDOW as i64,
        "long_window" => crate::domain::strategy::DEFAULT_LONG_WINDOW as i64,
        _ => crate::domain::strategy::DEFAULT_BB_WINDOW as i64,
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), CryptosigError> {
    let start = parse_date(config.get_string("analysis", "start_date").as_deref(), "start_date")?;
    let end = parse_date(config.get_string("analysis", "end_date").as_deref(), "end_date")?;

    if start >= end {
        return Err(invalid("start_date", "start_date must be before end_date"));
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, CryptosigError> {
    match value {
        None => Err(CryptosigError::ConfigMissing {
            section: "analysis".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            invalid(field, &format!("invalid {field} format, expected YYYY-MM-DD"))
        }),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), CryptosigError> {
    match config.get_string("analysis", "symbols") {
        None => Err(CryptosigError::ConfigMissing {
            section: "analysis".to_string(),
            key: "symbols".to_string(),
        }),
        Some(raw) => parse_symbols(&raw).map(|_| ()),
    }
}
