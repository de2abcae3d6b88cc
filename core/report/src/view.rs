//! FILENAME: core/report/src/view.rs
//! Pivot View - Renderable output.
//!
//! This module walks the engine's axis labels once and produces a 2D grid
//! that every renderer formats. The grid always has the same shape:
//! - one header row: corner, column labels, total heading
//! - one data row per row label: label, cells, row total
//! - one summary row: summary label, column totals, grand total
//!
//! Cells whose (row, column) pair has no record stay `Empty`, never zero.

use serde::{Deserialize, Serialize};
use dataset::format_number;
use pivot_engine::PivotEngine;

// ============================================================================
// CELL TYPES
// ============================================================================

/// The type of a cell in the pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotCellType {
    /// Empty corner cell (top-left).
    Corner,
    /// Column header label.
    ColumnHeader,
    /// Heading of the row-total column.
    TotalHeader,
    /// Row header label.
    RowHeader,
    /// Data cell (first matching value).
    Data,
    /// Row total (last column of a data row).
    RowTotal,
    /// Label of the summary row.
    SummaryLabel,
    /// Column total (summary row).
    ColumnTotal,
    /// Grand total (bottom-right).
    GrandTotal,
}

impl PivotCellType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PivotCellType::Data
                | PivotCellType::RowTotal
                | PivotCellType::ColumnTotal
                | PivotCellType::GrandTotal
        )
    }
}

/// Display value for a pivot cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PivotCellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl PivotCellValue {
    pub fn text(s: impl Into<String>) -> Self {
        PivotCellValue::Text(s.into())
    }

    /// Formats the value; integral numbers drop the trailing ".0".
    pub fn display(&self) -> String {
        match self {
            PivotCellValue::Empty => String::new(),
            PivotCellValue::Number(n) => format_number(*n),
            PivotCellValue::Text(s) => s.clone(),
        }
    }
}

impl From<Option<f64>> for PivotCellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(PivotCellValue::Empty, PivotCellValue::Number)
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// A single cell in the pivot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotViewCell {
    pub value: PivotCellValue,
    pub cell_type: PivotCellType,
}

impl PivotViewCell {
    fn new(cell_type: PivotCellType, value: PivotCellValue) -> Self {
        PivotViewCell { value, cell_type }
    }

    pub fn display(&self) -> String {
        self.value.display()
    }
}

/// The type of a row in the pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotRowType {
    Header,
    Data,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotViewRow {
    pub row_type: PivotRowType,
    pub cells: Vec<PivotViewCell>,
}

/// Captions used for the total column heading and the summary row.
#[derive(Debug, Clone, Copy)]
pub struct ViewCaptions<'a> {
    pub total_header: &'a str,
    pub summary_label: &'a str,
}

impl Default for ViewCaptions<'_> {
    fn default() -> Self {
        ViewCaptions {
            total_header: "Total",
            summary_label: "Total",
        }
    }
}

/// The complete renderable grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    pub rows: Vec<PivotViewRow>,
    /// Cells per row (column labels + label column + total column).
    pub col_count: usize,
}

impl PivotView {
    /// Builds the grid by querying the engine in nested-loop order
    /// (for each row label, for each column label).
    pub fn build(engine: &PivotEngine, captions: ViewCaptions<'_>) -> Self {
        let columns = engine.column_labels();
        let col_count = columns.len() + 2;
        let mut rows = Vec::with_capacity(engine.row_labels().len() + 2);

        // Header
        let mut header = Vec::with_capacity(col_count);
        header.push(PivotViewCell::new(PivotCellType::Corner, PivotCellValue::Empty));
        for column in columns {
            header.push(PivotViewCell::new(
                PivotCellType::ColumnHeader,
                PivotCellValue::text(column.to_string()),
            ));
        }
        header.push(PivotViewCell::new(
            PivotCellType::TotalHeader,
            PivotCellValue::text(captions.total_header),
        ));
        rows.push(PivotViewRow { row_type: PivotRowType::Header, cells: header });

        // Data
        for row in engine.row_labels() {
            let mut cells = Vec::with_capacity(col_count);
            cells.push(PivotViewCell::new(
                PivotCellType::RowHeader,
                PivotCellValue::text(row.to_string()),
            ));
            for column in columns {
                cells.push(PivotViewCell::new(
                    PivotCellType::Data,
                    engine.cell_value(row, column).into(),
                ));
            }
            cells.push(PivotViewCell::new(
                PivotCellType::RowTotal,
                PivotCellValue::Number(engine.total_for_row(row)),
            ));
            rows.push(PivotViewRow { row_type: PivotRowType::Data, cells });
        }

        // Summary
        let mut summary = Vec::with_capacity(col_count);
        summary.push(PivotViewCell::new(
            PivotCellType::SummaryLabel,
            PivotCellValue::text(captions.summary_label),
        ));
        for column in columns {
            summary.push(PivotViewCell::new(
                PivotCellType::ColumnTotal,
                PivotCellValue::Number(engine.total_for_column(column)),
            ));
        }
        summary.push(PivotViewCell::new(
            PivotCellType::GrandTotal,
            PivotCellValue::Number(engine.grand_total()),
        ));
        rows.push(PivotViewRow { row_type: PivotRowType::Summary, cells: summary });

        PivotView { rows, col_count }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The display strings of every cell, row by row.
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(PivotViewCell::display).collect())
            .collect()
    }
}
