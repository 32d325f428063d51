//! Strategy identity and analysis configuration.

use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_MA_WINDOWS: [usize; 4] = [7, 30, 60, 100];
pub const DEFAULT_CHANGE_WINDOWS: [usize; 5] = [1, 7, 30, 180, 365];
pub const DEFAULT_SHORT_WINDOW: usize = 7;
pub const DEFAULT_LONG_WINDOW: usize = 30;
pub const DEFAULT_BB_WINDOW: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    MaCrossover,
    BbBounce,
}

impl StrategyKind {
    /// Short tag used for report column names.
    pub fn tag(&self) -> &'static str {
        match self {
            StrategyKind::MaCrossover => "ma",
            StrategyKind::BbBounce => "bb",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::MaCrossover => write!(f, "Moving Average Crossover"),
            StrategyKind::BbBounce => write!(f, "Bollinger Bands Bounce"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub symbols: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub epsilon: f64,
    pub ma_windows: Vec<usize>,
    pub change_windows: Vec<usize>,
    pub short_window: usize,
    pub long_window: usize,
    pub bb_window: usize,
    pub ma_crossover: bool,
    pub bb_bounce: bool,
}

impl AnalysisConfig {
    pub fn enabled_strategies(&self) -> Vec<StrategyKind> {
        let mut strategies = Vec::new();
        if self.ma_crossover {
            strategies.push(StrategyKind::MaCrossover);
        }
        if self.bb_bounce {
            strategies.push(StrategyKind::BbBounce);
        }
        strategies
    }
}
