//! Rolling indicator series over a price axis.
//!
//! Each indicator is a `calculate_*` function producing an `IndicatorSeries`
//! aligned one-to-one with the input price series. Points inside an
//! indicator's warmup window carry `valid = false`; that is the expected
//! state for early rows, not an error.

pub mod sma;
pub mod bollinger;
pub mod pct_change;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Bollinger { upper: f64, middle: f64, lower: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Bollinger(usize),
    PctChange(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Scalar value at index `i`, or `None` while inside the warmup window.
    pub fn simple_at(&self, i: usize) -> Option<f64> {
        let point = self.values.get(i)?;
        if !point.valid {
            return None;
        }
        match point.value {
            IndicatorValue::Simple(v) => Some(v),
            IndicatorValue::Bollinger { .. } => None,
        }
    }

    /// (upper, middle, lower) at index `i`, or `None` while inside the warmup window.
    pub fn bands_at(&self, i: usize) -> Option<(f64, f64, f64)> {
        let point = self.values.get(i)?;
        if !point.valid {
            return None;
        }
        match point.value {
            IndicatorValue::Bollinger { upper, middle, lower } => Some((upper, middle, lower)),
            IndicatorValue::Simple(_) => None,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "MA({})", window),
            IndicatorType::Bollinger(window) => write!(f, "BOLLINGER({})", window),
            IndicatorType::PctChange(window) => write!(f, "CHANGE({}d)", window),
        }
    }
}
