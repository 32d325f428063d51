//! Analysis pipeline: prices -> indicators -> signals -> positions.
//!
//! Per instrument the indicator table is computed once and shared by every
//! enabled strategy. Data flows strictly forward; no stage reads back from
//! a later one.

use crate::domain::error::CryptosigError;
use crate::domain::indicator_table::{compute_table, IndicatorTable};
use crate::domain::position::{scan_positions, PositionLabel, TradeRow};
use crate::domain::price::validate_series;
use crate::domain::signal::{bollinger_bounce_signals, ma_crossover_signals, RawSignal};
use crate::domain::strategy::{AnalysisConfig, StrategyKind};
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;

/// One step of a strategy's output table.
#[derive(Debug, Clone)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub signal: RawSignal,
    pub label: PositionLabel,
    pub result: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StrategyOutput {
    pub strategy: StrategyKind,
    pub rows: Vec<SignalRow>,
}

impl StrategyOutput {
    pub fn closed_trades(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.label == PositionLabel::Close)
            .count()
    }

    /// Sum of realised deltas across all closed trades.
    pub fn net_result(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.result).sum()
    }
}

#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub symbol: String,
    pub table: IndicatorTable,
    pub strategies: Vec<StrategyOutput>,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub instruments: Vec<InstrumentReport>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Run one strategy against a precomputed indicator table.
pub fn run_strategy(
    table: &IndicatorTable,
    strategy: StrategyKind,
    config: &AnalysisConfig,
) -> StrategyOutput {
    let signals = match strategy {
        StrategyKind::MaCrossover => ma_crossover_signals(
            table,
            config.short_window,
            config.long_window,
            config.epsilon,
        ),
        StrategyKind::BbBounce => {
            bollinger_bounce_signals(table, config.bb_window, config.epsilon)
        }
    };

    let prices: Vec<f64> = table.points.iter().map(|p| p.adj_close).collect();
    let trades = scan_positions(&signals, &prices);

    let rows = table
        .points
        .iter()
        .zip(signals)
        .zip(trades)
        .map(|((point, signal), TradeRow { label, result })| SignalRow {
            date: point.date,
            signal,
            label,
            result,
        })
        .collect();

    StrategyOutput { strategy, rows }
}

/// Run every enabled strategy for every configured symbol.
///
/// Symbols whose prices cannot be fetched are skipped with a warning. An
/// empty series in range is not an error; it yields an instrument with no
/// rows. Malformed series (unsorted dates, non-finite closes) abort the run
/// instead; silently signalling on garbage is worse than failing.
pub fn run_analysis(
    price_port: &dyn PricePort,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, CryptosigError> {
    let mut instruments = Vec::new();
    let mut skipped = Vec::new();

    for symbol in &config.symbols {
        let points = match price_port.fetch_prices(symbol, config.start_date, config.end_date) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        validate_series(&points)?;

        let table = compute_table(symbol, points, &config.ma_windows, &config.change_windows);
        let strategies = config
            .enabled_strategies()
            .into_iter()
            .map(|strategy| run_strategy(&table, strategy, config))
            .collect();

        instruments.push(InstrumentReport {
            symbol: symbol.clone(),
            table,
            strategies,
        });
    }

    if instruments.is_empty() && !config.symbols.is_empty() {
        return Err(CryptosigError::NoData {
            symbol: config.symbols.join(","),
        });
    }

    Ok(AnalysisReport {
        instruments,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;
    use crate::domain::strategy::{
        DEFAULT_CHANGE_WINDOWS, DEFAULT_EPSILON, DEFAULT_MA_WINDOWS,
    };

    fn make_points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &adj_close)| PricePoint {
                symbol: "BTC".into(),
                date: NaiveDate::from_ymd_opt(2021, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                adj_close,
            })
            .collect()
    }

    fn test_config() -> AnalysisConfig {
        AnalysisConfig {
            symbols: vec!["BTC".into()],
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            epsilon: DEFAULT_EPSILON,
            ma_windows: DEFAULT_MA_WINDOWS.to_vec(),
            change_windows: DEFAULT_CHANGE_WINDOWS.to_vec(),
            short_window: 7,
            long_window: 30,
            bb_window: 30,
            ma_crossover: true,
            bb_bounce: true,
        }
    }

    #[test]
    fn series_shorter_than_every_window_is_all_wait() {
        let config = AnalysisConfig {
            ma_crossover: true,
            bb_bounce: false,
            ..test_config()
        };
        let table = compute_table(
            "BTC",
            make_points(&[100.0, 101.0, 102.0]),
            &config.ma_windows,
            &[],
        );

        let output = run_strategy(&table, StrategyKind::MaCrossover, &config);

        assert_eq!(output.rows.len(), 3);
        assert!(output.rows.iter().all(|r| r.label == PositionLabel::Wait));
        assert!(output.rows.iter().all(|r| r.signal == RawSignal::Neutral));
        assert_eq!(output.closed_trades(), 0);
        assert_eq!(output.net_result(), 0.0);
    }

    #[test]
    fn strategy_output_shares_the_date_axis() {
        let config = AnalysisConfig {
            ma_windows: vec![2, 3],
            short_window: 2,
            long_window: 3,
            bb_window: 3,
            ..test_config()
        };
        let points = make_points(&[100.0, 110.0, 120.0, 130.0, 125.0]);
        let table = compute_table("BTC", points.clone(), &config.ma_windows, &[]);

        for strategy in [StrategyKind::MaCrossover, StrategyKind::BbBounce] {
            let output = run_strategy(&table, strategy, &config);
            assert_eq!(output.rows.len(), points.len());
            for (row, point) in output.rows.iter().zip(&points) {
                assert_eq!(row.date, point.date);
            }
        }
    }

    #[test]
    fn net_result_sums_closed_trades() {
        let config = AnalysisConfig {
            ma_windows: vec![1, 2],
            short_window: 1,
            long_window: 2,
            ..test_config()
        };
        // Strong rise then collapse: the crossover opens long and closes.
        let points = make_points(&[100.0, 150.0, 200.0, 100.0, 50.0]);
        let table = compute_table("BTC", points, &config.ma_windows, &[]);

        let output = run_strategy(&table, StrategyKind::MaCrossover, &config);
        let summed: f64 = output.rows.iter().filter_map(|r| r.result).sum();
        assert_eq!(output.net_result(), summed);
        assert_eq!(
            output.closed_trades(),
            output.rows.iter().filter(|r| r.result.is_some()).count()
        );
    }
}
