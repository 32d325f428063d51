//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for cryptosig.
#[derive(Debug, thiserror::Error)]
pub enum CryptosigError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price series for {symbol} is not sorted ascending at {date}")]
    UnsortedSeries { symbol: String, date: NaiveDate },

    #[error("non-finite adjusted close for {symbol} at {date}")]
    NonFinitePrice { symbol: String, date: NaiveDate },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CryptosigError> for std::process::ExitCode {
    fn from(err: &CryptosigError) -> Self {
        let code: u8 = match err {
            CryptosigError::Io(_) => 1,
            CryptosigError::ConfigParse { .. }
            | CryptosigError::ConfigMissing { .. }
            | CryptosigError::ConfigInvalid { .. } => 2,
            CryptosigError::Data { .. }
            | CryptosigError::NoData { .. }
            | CryptosigError::Csv(_) => 3,
            CryptosigError::UnsortedSeries { .. } | CryptosigError::NonFinitePrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
