//! Bollinger Bands indicator.
//!
//! - Middle: Simple Moving Average over n points
//! - Upper: Middle + 2 x StdDev
//! - Lower: Middle - 2 x StdDev
//!
//! StdDev is population standard deviation (divides by N) over the same
//! trailing window as the middle band.
//! Warmup: first (n-1) points are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PricePoint;

const BAND_WIDTH: f64 = 2.0;

pub fn calculate_bollinger(points: &[PricePoint], window: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());
    let warmup = window.saturating_sub(1);

    for i in 0..points.len() {
        let date = points[i].date;
        let valid = i >= warmup;

        let (upper, middle, lower) = if valid {
            let start = i + 1 - window;
            let slice = &points[start..=i];

            let middle: f64 = slice.iter().map(|p| p.adj_close).sum::<f64>() / window as f64;

            let variance: f64 = slice
                .iter()
                .map(|p| {
                    let diff = p.adj_close - middle;
                    diff * diff
                })
                .sum::<f64>()
                / window as f64;

            let stddev = variance.sqrt();
            (middle + BAND_WIDTH * stddev, middle, middle - BAND_WIDTH * stddev)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            date,
            valid,
            value: IndicatorValue::Bollinger { upper, middle, lower },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger(window),
        values,
    }
}
