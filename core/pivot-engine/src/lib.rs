//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot aggregation subsystem.
//!
//! This crate turns a flat `Dataset` into a two-axis summary: distinct row and
//! column labels plus cell, row, column and grand totals. It depends on
//! `dataset` only for the record and value types.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot IS)
//! - `cache`: Interned axis labels (HOW we look things up)
//! - `engine`: Aggregation engine (HOW we calculate)

pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod logging;

#[doc(hidden)]
pub use log;

pub use cache::{AxisLabel, AxisValues, LabelId, OrderedFloat};
pub use definition::{Axis, AxisSelector, PivotDefinition};
pub use engine::PivotEngine;
pub use error::PivotError;
