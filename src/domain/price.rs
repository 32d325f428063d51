//! Daily price observations and series validation.

use crate::domain::error::CryptosigError;
use chrono::NaiveDate;

/// One trading day's adjusted close for one instrument.
#[derive(Debug, Clone)]
pub struct PricePoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub adj_close: f64,
}

/// Reject series the pipeline cannot produce meaningful signals from:
/// out-of-order dates or non-finite closes. An empty series is fine; it
/// yields degenerate (all-Wait) output downstream.
pub fn validate_series(points: &[PricePoint]) -> Result<(), CryptosigError> {
    for pair in points.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(CryptosigError::UnsortedSeries {
                symbol: pair[1].symbol.clone(),
                date: pair[1].date,
            });
        }
    }
    for point in points {
        if !point.adj_close.is_finite() {
            return Err(CryptosigError::NonFinitePrice {
                symbol: point.symbol.clone(),
                date: point.date,
            });
        }
    }
    Ok(())
}
