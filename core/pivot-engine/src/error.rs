//! FILENAME: core/pivot-engine/src/error.rs

use dataset::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PivotError {
    #[error("Record {record} has no field '{field}'")]
    MissingField { record: usize, field: String },

    #[error("Record {record} field '{field}' is not numeric: '{value}'")]
    NonNumericValue {
        record: usize,
        field: String,
        value: String,
    },

    #[error("Invalid pivot definition: {0}")]
    Definition(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}
