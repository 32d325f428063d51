//! Price data access port trait.
//!
//! Acquisition of the raw series (exchange APIs, downloads) lives behind
//! this trait; the domain only ever sees ordered per-day records.

use crate::domain::error::CryptosigError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait PricePort {
    /// Fetch the daily series for one symbol, ascending by date, restricted
    /// to `[start_date, end_date]`.
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CryptosigError>;

    fn list_symbols(&self) -> Result<Vec<String>, CryptosigError>;

    /// (first date, last date, row count) for a symbol, `None` if absent.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CryptosigError>;
}
