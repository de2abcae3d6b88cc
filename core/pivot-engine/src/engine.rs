//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - The aggregation core.
//!
//! The engine takes an AxisSelector (configuration) and a Dataset (data) and
//! answers cell, row, column and grand-total queries.
//!
//! Algorithm:
//! 1. Scan the dataset once, interning row and column labels in
//!    first-occurrence order
//! 2. During the same scan, record the FIRST value seen for every
//!    (row, column) pair and accumulate running sums per row, per column
//!    and overall
//! 3. Queries resolve labels to ids and read the pre-computed index
//!
//! `cell_value` deliberately returns the first matching record's value rather
//! than a sum over duplicate (row, column) pairs, while every total sums all
//! matching records. Datasets with duplicate pairs therefore show row totals
//! that differ from the sum of their visible cells.

use rustc_hash::FxHashMap;
use dataset::{Dataset, Record, Value};

use crate::cache::{AxisLabel, AxisValues, LabelId};
use crate::definition::{Axis, AxisSelector};
use crate::error::PivotError;
use crate::{log_debug, log_warn};

// ============================================================================
// AGGREGATE INDEX
// ============================================================================

/// Pre-computed lookups built once during construction.
#[derive(Debug, Clone, Default)]
struct AggregateIndex {
    /// Value of the first record seen for each (row, column) pair.
    first_cell: FxHashMap<(LabelId, LabelId), f64>,

    /// Running sum per row label (indexed by LabelId).
    row_totals: Vec<f64>,

    /// Running sum per column label (indexed by LabelId).
    column_totals: Vec<f64>,

    grand_total: f64,
}

impl AggregateIndex {
    fn add(&mut self, row: LabelId, column: LabelId, value: f64) {
        self.first_cell.entry((row, column)).or_insert(value);
        accumulate(&mut self.row_totals, row, value);
        accumulate(&mut self.column_totals, column, value);
        self.grand_total += value;
    }

    fn totals(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Row => &self.row_totals,
            Axis::Column => &self.column_totals,
        }
    }
}

fn accumulate(totals: &mut Vec<f64>, id: LabelId, value: f64) {
    let slot = id as usize;
    if slot >= totals.len() {
        totals.resize(slot + 1, 0.0);
    }
    totals[slot] += value;
}

// ============================================================================
// PIVOT ENGINE
// ============================================================================

/// Single source of truth for all aggregation queries over a fixed dataset.
///
/// Immutable after construction, so a shared reference can be handed to any
/// number of renderers or threads.
#[derive(Debug, Clone)]
pub struct PivotEngine {
    selector: AxisSelector,
    dataset: Dataset,
    rows: AxisValues,
    columns: AxisValues,
    index: AggregateIndex,
}

impl PivotEngine {
    /// Builds the engine, scanning the dataset exactly once.
    ///
    /// Fails on the first record that lacks one of the selector fields or
    /// whose value field cannot be read as a number.
    pub fn new(selector: AxisSelector, dataset: Dataset) -> Result<Self, PivotError> {
        let mut rows = AxisValues::new();
        let mut columns = AxisValues::new();
        let mut index = AggregateIndex::default();

        for (i, record) in dataset.iter().enumerate() {
            let (row_label, column_label, value) = match extract(&selector, i, record) {
                Ok(parts) => parts,
                Err(e) => {
                    log_warn!("PIVOT", "rejecting dataset: {}", e);
                    return Err(e);
                }
            };

            let row = rows.intern(row_label);
            let column = columns.intern(column_label);
            index.add(row, column, value);
        }

        log_debug!(
            "PIVOT",
            "built engine records={} rows={} cols={} cells={}",
            dataset.len(),
            rows.len(),
            columns.len(),
            index.first_cell.len()
        );

        Ok(PivotEngine {
            selector,
            dataset,
            rows,
            columns,
            index,
        })
    }

    /// Value of the FIRST record matching both labels, or None when no
    /// record matches. Duplicate pairs are not summed.
    pub fn cell_value(
        &self,
        row: impl Into<AxisLabel>,
        column: impl Into<AxisLabel>,
    ) -> Option<f64> {
        let row = self.rows.id_of(&row.into())?;
        let column = self.columns.id_of(&column.into())?;
        self.index.first_cell.get(&(row, column)).copied()
    }

    /// Sum of the value field over every record with this row label.
    pub fn total_for_row(&self, row: impl Into<AxisLabel>) -> f64 {
        self.total_for(Axis::Row, &row.into())
    }

    /// Sum of the value field over every record with this column label.
    pub fn total_for_column(&self, column: impl Into<AxisLabel>) -> f64 {
        self.total_for(Axis::Column, &column.into())
    }

    /// Sum of the value field over every record whose `axis` field equals
    /// `label`. Unknown labels total 0.
    pub fn total_for(&self, axis: Axis, label: &AxisLabel) -> f64 {
        self.axis_values(axis)
            .id_of(label)
            .and_then(|id| self.index.totals(axis).get(id as usize).copied())
            .unwrap_or(0.0)
    }

    pub fn grand_total(&self) -> f64 {
        self.index.grand_total
    }

    /// Distinct row labels in first-occurrence order.
    pub fn row_labels(&self) -> &[AxisLabel] {
        self.rows.labels()
    }

    /// Distinct column labels in first-occurrence order.
    pub fn column_labels(&self) -> &[AxisLabel] {
        self.columns.labels()
    }

    pub fn labels(&self, axis: Axis) -> &[AxisLabel] {
        self.axis_values(axis).labels()
    }

    pub fn selector(&self) -> &AxisSelector {
        &self.selector
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn record_count(&self) -> usize {
        self.dataset.len()
    }

    fn axis_values(&self, axis: Axis) -> &AxisValues {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }
}

/// Pulls the row label, column label and numeric value out of one record.
fn extract(
    selector: &AxisSelector,
    index: usize,
    record: &Record,
) -> Result<(AxisLabel, AxisLabel, f64), PivotError> {
    let row = AxisLabel::from(field(record, index, &selector.row_field)?);
    let column = AxisLabel::from(field(record, index, &selector.column_field)?);
    let raw = field(record, index, &selector.value_field)?;
    let value = raw.as_number().ok_or_else(|| PivotError::NonNumericValue {
        record: index,
        field: selector.value_field.clone(),
        value: raw.display_value(),
    })?;

    Ok((row, column, value))
}

fn field<'a>(record: &'a Record, index: usize, name: &str) -> Result<&'a Value, PivotError> {
    record.get(name).ok_or_else(|| PivotError::MissingField {
        record: index,
        field: name.to_string(),
    })
}
