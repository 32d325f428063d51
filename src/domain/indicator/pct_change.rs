//! Percentage change over a fixed number of trading days.
//!
//! CHANGE(n)[i] = ((P[i] - P[i-n]) / P[i-n]) * 100
//! If P[i-n] == 0: CHANGE = 0
//! Warmup: first n points invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PricePoint;

pub fn calculate_pct_change(points: &[PricePoint], window: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());

    for i in 0..points.len() {
        let date = points[i].date;
        let valid = i >= window;

        let value = if valid {
            let prev = points[i - window].adj_close;
            let curr = points[i].adj_close;

            if prev == 0.0 {
                0.0
            } else {
                ((curr - prev) / prev) * 100.0
            }
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
        indicator_type: IndicatorType::PctChange(window),
        values,
    }
}
