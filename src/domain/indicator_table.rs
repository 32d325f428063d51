//! Per-instrument indicator table shared by the strategies.
//!
//! Computed once per instrument from the validated price series, then read
//! by every enabled strategy. Series share the price date axis one-to-one.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::pct_change::calculate_pct_change;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price::PricePoint;

#[derive(Debug, Clone)]
pub struct IndicatorTable {
    pub symbol: String,
    pub points: Vec<PricePoint>,
    pub moving_averages: Vec<IndicatorSeries>,
    pub bollinger_bands: Vec<IndicatorSeries>,
    pub changes: Vec<IndicatorSeries>,
}

pub fn compute_table(
    symbol: &str,
    points: Vec<PricePoint>,
    ma_windows: &[usize],
    change_windows: &[usize],
) -> IndicatorTable {
    let moving_averages = ma_windows
        .iter()
        .map(|&w| calculate_sma(&points, w))
        .collect();
    let bollinger_bands = ma_windows
        .iter()
        .map(|&w| calculate_bollinger(&points, w))
        .collect();
    let changes = change_windows
        .iter()
        .map(|&w| calculate_pct_change(&points, w))
        .collect();

    IndicatorTable {
        symbol: symbol.to_string(),
        points,
        moving_averages,
        bollinger_bands,
        changes,
    }
}

impl IndicatorTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn sma(&self, window: usize) -> Option<&IndicatorSeries> {
        self.moving_averages
            .iter()
            .find(|s| s.indicator_type == IndicatorType::Sma(window))
    }

    pub fn bands(&self, window: usize) -> Option<&IndicatorSeries> {
        self.bollinger_bands
            .iter()
            .find(|s| s.indicator_type == IndicatorType::Bollinger(window))
    }
}
