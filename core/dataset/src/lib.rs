//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Source data types for pivot reports.
//! CONTEXT: Re-exports the value, record and dataset types used by
//! `pivot-engine` and `report`.

pub mod error;
pub mod record;
pub mod value;

pub use error::DatasetError;
pub use record::{Dataset, Record};
pub use value::{format_number, Value};
