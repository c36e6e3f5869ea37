//! Error types shared by the loaders and the analysis core.

use thiserror::Error;

/// Failure of a single analysis run or of loading its input.
///
/// Every variant aborts the run that raised it; no partial rows are produced.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("insufficient data for `{series}`: {len} observations, window needs {window}")]
    InsufficientData {
        series: String,
        len: usize,
        window: usize,
    },

    #[error("invalid quantile {0}: cycle service level must lie in (0, 1)")]
    InvalidQuantile(f64),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
