//! CSV report adapter.
//!
//! Writes three files per instrument into the output directory:
//! `{symbol}_indicators.csv`, `{symbol}_percentage_change.csv` and
//! `{symbol}_signals.csv`. Indicator cells inside a warmup window are left
//! empty; a signal row's result cell is 0 everywhere except a Close row.

use crate::domain::analysis::{AnalysisReport, InstrumentReport};
use crate::domain::error::CryptosigError;
use crate::domain::indicator::IndicatorType;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn write_indicators(
        &self,
        instrument: &InstrumentReport,
        output_dir: &Path,
    ) -> Result<(), CryptosigError> {
        let table = &instrument.table;
        let path = output_dir.join(format!("{}_indicators.csv", instrument.symbol));
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["date".to_string(), "adj_close".to_string()];
        for series in &table.moving_averages {
            if let IndicatorType::Sma(w) = series.indicator_type {
                header.push(format!("ma_{}", w));
                header.push(format!("upper_{}", w));
                header.push(format!("lower_{}", w));
            }
        }
        wtr.write_record(&header)?;

        for i in 0..table.len() {
            let mut record = vec![
                table.points[i].date.to_string(),
                table.points[i].adj_close.to_string(),
            ];
            for (ma, bands) in table.moving_averages.iter().zip(&table.bollinger_bands) {
                record.push(cell(ma.simple_at(i)));
                match bands.bands_at(i) {
                    Some((upper, _, lower)) => {
                        record.push(upper.to_string());
                        record.push(lower.to_string());
                    }
                    None => {
                        record.push(String::new());
                        record.push(String::new());
                    }
                }
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_changes(
        &self,
        instrument: &InstrumentReport,
        output_dir: &Path,
    ) -> Result<(), CryptosigError> {
        let table = &instrument.table;
        let path = output_dir.join(format!("{}_percentage_change.csv", instrument.symbol));
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["date".to_string()];
        for series in &table.changes {
            if let IndicatorType::PctChange(w) = series.indicator_type {
                header.push(format!("change_{}d", w));
            }
        }
        wtr.write_record(&header)?;

        for i in 0..table.len() {
            let mut record = vec![table.points[i].date.to_string()];
            for series in &table.changes {
                record.push(cell(series.simple_at(i)));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_signals(
        &self,
        instrument: &InstrumentReport,
        output_dir: &Path,
    ) -> Result<(), CryptosigError> {
        let path = output_dir.join(format!("{}_signals.csv", instrument.symbol));
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["date".to_string()];
        for output in &instrument.strategies {
            let tag = output.strategy.tag();
            header.push(format!("signal_{}", tag));
            header.push(format!("position_{}", tag));
            header.push(format!("result_{}", tag));
        }
        wtr.write_record(&header)?;

        for i in 0..instrument.table.len() {
            let mut record = vec![instrument.table.points[i].date.to_string()];
            for output in &instrument.strategies {
                let row = &output.rows[i];
                record.push(row.signal.as_i8().to_string());
                record.push(row.label.to_string());
                record.push(row.result.unwrap_or(0.0).to_string());
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write_analysis(
        &self,
        report: &AnalysisReport,
        output_dir: &Path,
    ) -> Result<(), CryptosigError> {
        fs::create_dir_all(output_dir)?;
        for instrument in &report.instruments {
            self.write_indicators(instrument, output_dir)?;
            self.write_changes(instrument, output_dir)?;
            self.write_signals(instrument, output_dir)?;
        }
        Ok(())
    }
}
