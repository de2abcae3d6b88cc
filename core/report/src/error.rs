//! FILENAME: core/report/src/error.rs

use pivot_engine::PivotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF write error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Invalid report options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Pivot error: {0}")]
    Pivot(#[from] PivotError),
}
