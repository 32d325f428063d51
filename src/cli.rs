//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::run_analysis;
use crate::domain::config_validation::{parse_symbols, parse_windows, validate_analysis_config};
use crate::domain::error::CryptosigError;
use crate::domain::strategy::{
    AnalysisConfig, DEFAULT_BB_WINDOW, DEFAULT_CHANGE_WINDOWS, DEFAULT_EPSILON,
    DEFAULT_LONG_WINDOW, DEFAULT_MA_WINDOWS, DEFAULT_SHORT_WINDOW,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;

#[derive(Parser, Debug)]
#[command(name = "cryptosig", about = "Rule-based crypto trading signal analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run indicators and strategies over the configured symbols
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        /// Analyze a single symbol instead of the configured list
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List symbols with price data
    ListSymbols {
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
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            symbol,
            output,
            dry_run,
        } => run_analyze(&config, symbol.as_deref(), output.as_deref(), dry_run),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CryptosigError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble the analysis configuration from a validated config source.
pub fn build_analysis_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<AnalysisConfig, CryptosigError> {
    let symbols = match symbol_override {
        Some(symbol) => vec![symbol.to_uppercase()],
        None => {
            let raw = adapter.get_string("analysis", "symbols").ok_or_else(|| {
                CryptosigError::ConfigMissing {
                    section: "analysis".into(),
                    key: "symbols".into(),
                }
            })?;
            parse_symbols(&raw)?
        }
    };

    let start_date = read_date(adapter, "start_date")?;
    let end_date = read_date(adapter, "end_date")?;

    let ma_windows = match adapter.get_string("analysis", "ma_windows") {
        Some(raw) => parse_windows("ma_windows", &raw)?,
        None => DEFAULT_MA_WINDOWS.to_vec(),
    };
    let change_windows = match adapter.get_string("analysis", "change_windows") {
        Some(raw) => parse_windows("change_windows", &raw)?,
        None => DEFAULT_CHANGE_WINDOWS.to_vec(),
    };

    Ok(AnalysisConfig {
        symbols,
        start_date,
        end_date,
        epsilon: adapter.get_double("analysis", "epsilon", DEFAULT_EPSILON),
        ma_windows,
        change_windows,
        short_window: adapter.get_int("analysis", "short_window", DEFAULT_SHORT_WINDOW as i64)
            as usize,
        long_window: adapter.get_int("analysis", "long_window", DEFAULT_LONG_WINDOW as i64)
            as usize,
        bb_window: adapter.get_int("analysis", "bb_window", DEFAULT_BB_WINDOW as i64) as usize,
        ma_crossover: adapter.get_bool("strategy", "ma_crossover", true),
        bb_bounce: adapter.get_bool("strategy", "bb_bounce", true),
    })
}

fn read_date(adapter: &dyn ConfigPort, key: &str) -> Result<NaiveDate, CryptosigError> {
    let raw = adapter
        .get_string("analysis", key)
        .ok_or_else(|| CryptosigError::ConfigMissing {
            section: "analysis".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| CryptosigError::ConfigInvalid {
        section: "analysis".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn price_adapter(adapter: &dyn ConfigPort) -> Result<CsvPriceAdapter, CryptosigError> {
    let base_path =
        adapter
            .get_string("data", "base_path")
            .ok_or_else(|| CryptosigError::ConfigMissing {
                section: "data".into(),
                key: "base_path".into(),
            })?;
    Ok(CsvPriceAdapter::new(PathBuf::from(base_path)))
}

fn run_analyze(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_override: Option<&std::path::Path>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let config = match build_analysis_config(&adapter, symbol_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        eprintln!(
            "Would analyze {} symbol(s) from {} to {}:",
            config.symbols.len(),
            config.start_date,
            config.end_date
        );
        for symbol in &config.symbols {
            eprintln!("  {}", symbol);
        }
        for strategy in config.enabled_strategies() {
            eprintln!("  strategy: {}", strategy);
        }
        return ExitCode::SUCCESS;
    }

    let port = match price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = match run_analysis(&port, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for instrument in &report.instruments {
        eprintln!("{}: {} rows", instrument.symbol, instrument.table.len());
        for output in &instrument.strategies {
            eprintln!(
                "  {}: {} closed trade(s), net result {:.4}",
                output.strategy,
                output.closed_trades(),
                output.net_result()
            );
        }
    }

    let output_dir = output_override
        .map(|p| p.to_path_buf())
        .or_else(|| adapter.get_string("report", "output_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let report_adapter = CsvReportAdapter::new();
    if let Err(e) = report_adapter.write_analysis(&report, &output_dir) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!(
        "Wrote reports for {} instrument(s) to {}",
        report.instruments.len(),
        output_dir.display()
    );

    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let port = match price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    match port.list_symbols() {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{}", symbol);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(symbol: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let port = match price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match port.list_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for symbol in symbols {
        match port.get_data_range(&symbol) {
            Ok(Some((first, last, rows))) => {
                println!("{}: {} to {} ({} rows)", symbol, first, last, rows);
            }
            Ok(None) => println!("{}: no data", symbol),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_analysis_config(&adapter) {
        Ok(()) => {
            eprintln!("Config OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
