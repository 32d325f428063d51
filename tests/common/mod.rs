#![allow(dead_code)]

use chrono::NaiveDate;
use cryptosig::domain::error::CryptosigError;
pub use cryptosig::domain::price::PricePoint;
use cryptosig::domain::strategy::AnalysisConfig;
use cryptosig::ports::price_port::PricePort;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CryptosigError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CryptosigError::Data {
                reason: reason.clone(),
            });
        }
        let mut points = self.data.get(symbol).cloned().unwrap_or_default();
        points.retain(|p| p.date >= start_date && p.date <= end_date);
        Ok(points)
    }

    fn list_symbols(&self) -> Result<Vec<String>, CryptosigError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CryptosigError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CryptosigError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(points) if !points.is_empty() => {
                let min = points.iter().map(|p| p.date).min().unwrap();
                let max = points.iter().map(|p| p.date).max().unwrap();
                Ok(Some((min, max, points.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_point(symbol: &str, date_str: &str, adj_close: f64) -> PricePoint {
    PricePoint {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        adj_close,
    }
}

/// Consecutive daily points starting 2021-01-01.
pub fn make_series(symbol: &str, prices: &[f64]) -> Vec<PricePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &adj_close)| PricePoint {
            symbol: symbol.to_string(),
            date: date(2021, 1, 1) + chrono::Days::new(i as u64),
            adj_close,
        })
        .collect()
}

/// Small windows so short fixtures produce real signals.
pub fn sample_config(symbols: &[&str]) -> AnalysisConfig {
    AnalysisConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        start_date: date(2021, 1, 1),
        end_date: date(2022, 1, 1),
        epsilon: 0.1,
        ma_windows: vec![1, 3],
        change_windows: vec![1],
        short_window: 1,
        long_window: 3,
        bb_window: 3,
        ma_crossover: true,
        bb_bounce: true,
    }
}
