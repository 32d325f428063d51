//! Simple Moving Average indicator.
//!
//! MA(n)[i] = mean of the last n adjusted closes, trailing only.
//! Warmup: first (n-1) points are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PricePoint;

pub fn calculate_sma(points: &[PricePoint], window: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());
    let warmup = window.saturating_sub(1);

    for i in 0..points.len() {
        let date = points[i].date;
        let valid = i >= warmup;

        let value = if valid {
            let start = i + 1 - window;
            points[start..=i].iter().map(|p| p.adj_close).sum::<f64>() / window as f64
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            date,
            valid,
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(window),
        values,
    }
}
