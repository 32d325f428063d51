//! Report export port trait.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::CryptosigError;
use std::path::Path;

/// Port for persisting a finished analysis (indicator tables, percentage
/// changes, signal tables).
pub trait ReportPort {
    fn write_analysis(
        &self,
        report: &AnalysisReport,
        output_dir: &Path,
    ) -> Result<(), CryptosigError>;
}
