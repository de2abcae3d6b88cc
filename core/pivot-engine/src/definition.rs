//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a pivot report:
//! which fields feed the two axes and the value, plus display metadata.
//! These structures are plain data and can be loaded from JSON.

use std::io::Read;

use serde::{Deserialize, Serialize};
use dataset::Dataset;

use crate::engine::PivotEngine;
use crate::error::PivotError;

// ============================================================================
// AXIS
// ============================================================================

/// One of the two pivot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
}

// ============================================================================
// AXIS SELECTOR
// ============================================================================

/// Names the record fields that supply the row label, the column label,
/// and the value to sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelector {
    pub row_field: String,
    pub column_field: String,
    pub value_field: String,
}

impl AxisSelector {
    pub fn new(
        row_field: impl Into<String>,
        column_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        AxisSelector {
            row_field: row_field.into(),
            column_field: column_field.into(),
            value_field: value_field.into(),
        }
    }

    /// Returns the field name feeding the given axis.
    pub fn field_for(&self, axis: Axis) -> &str {
        match axis {
            Axis::Row => &self.row_field,
            Axis::Column => &self.column_field,
        }
    }

    /// All three selector fields, in row/column/value order.
    pub fn fields(&self) -> [&str; 3] {
        [
            self.row_field.as_str(),
            self.column_field.as_str(),
            self.value_field.as_str(),
        ]
    }
}

// ============================================================================
// PIVOT DEFINITION
// ============================================================================

/// The complete description of a pivot report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Display title. Also used to derive default download file names.
    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub selector: AxisSelector,
}

impl PivotDefinition {
    pub fn new(title: impl Into<String>, selector: AxisSelector) -> Self {
        PivotDefinition {
            title: title.into(),
            selector,
        }
    }

    /// Parses a definition such as
    /// `{"title": "Sales", "row_field": "region", "column_field": "month", "value_field": "amount"}`.
    pub fn from_json(json: &str) -> Result<Self, PivotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the engine for this definition over the given dataset.
    pub fn build(&self, dataset: Dataset) -> Result<PivotEngine, PivotError> {
        PivotEngine::new(self.selector.clone(), dataset)
    }

    /// Reads a JSON array of records from `reader` and builds the engine.
    pub fn load<R: Read>(&self, reader: R) -> Result<PivotEngine, PivotError> {
        let dataset = Dataset::from_json_reader(reader)?;
        self.build(dataset)
    }
}
