//! CSV price file adapter.
//!
//! One file per symbol under a base directory, named `{SYMBOL}.csv`, with a
//! header row and `date,adj_close` columns.

use crate::domain::error::CryptosigError;
use crate::domain::price::PricePoint;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<PricePoint>, CryptosigError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| CryptosigError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CryptosigError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| CryptosigError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                CryptosigError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let adj_close: f64 = record
                .get(1)
                .ok_or_else(|| CryptosigError::Data {
                    reason: "missing adj_close column".into(),
                })?
                .parse()
                .map_err(|e| CryptosigError::Data {
                    reason: format!("invalid adj_close value: {}", e),
                })?;

            points.push(PricePoint {
                symbol: symbol.to_string(),
                date,
                adj_close,
            });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

impl PricePort for CsvPriceAdapter {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CryptosigError> {
        let mut points = self.read_all(symbol)?;
        points.retain(|p| p.date >= start_date && p.date <= end_date);
        Ok(points)
    }

    fn list_symbols(&self) -> Result<Vec<String>, CryptosigError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| CryptosigError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CryptosigError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CryptosigError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let points = self.read_all(symbol)?;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, points.len()))),
            _ => Ok(None),
        }
    }
}
