//! FILENAME: core/report/src/lib.rs
//! Pivot Report Module
//!
//! Formats a `PivotEngine` as HTML, CSV or PDF. Renderers are stateless:
//! they build a `PivotView` from the engine's queries and write it out.
//! `Download` bundles a rendered body with its response headers.

mod error;

pub mod csv_writer;
pub mod download;
pub mod html;
pub mod options;
pub mod pdf_writer;
pub mod view;

pub use csv_writer::CsvRenderer;
pub use download::{default_filename, Disposition, Download};
pub use error::ReportError;
pub use html::{default_css, escape_html, HtmlRenderer};
pub use options::{CsvOptions, HtmlOptions, PdfDisposition, PdfOptions, ReportOptions};
pub use pdf_writer::PdfRenderer;
pub use view::{PivotCellType, PivotCellValue, PivotRowType, PivotView, PivotViewCell, PivotViewRow, ViewCaptions};

use pivot_engine::PivotEngine;
use std::io::Write;

/// A stateless output format for a pivot summary.
pub trait Renderer {
    /// Writes the rendered report for `engine` into `sink`.
    fn render(&self, title: &str, engine: &PivotEngine, sink: &mut dyn Write) -> Result<(), ReportError>;

    /// MIME type of the rendered output.
    fn content_type(&self) -> &'static str;

    /// File extension, without the dot.
    fn extension(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod test_support {
    use dataset::{Dataset, Record};
    use pivot_engine::{AxisSelector, PivotEngine};

    fn sale(region: &str, month: &str, amount: f64) -> Record {
        Record::new()
            .with("region", region)
            .with("month", month)
            .with("amount", amount)
    }

    pub fn create_engine(records: Vec<Record>) -> PivotEngine {
        PivotEngine::new(AxisSelector::new("region", "month", "amount"), Dataset::new(records)).unwrap()
    }

    pub fn create_test_engine() -> PivotEngine {
        create_engine(vec![
            sale("A", "Jan", 10.0),
            sale("A", "Feb", 5.0),
            sale("B", "Jan", 7.0),
        ])
    }

    pub fn create_duplicate_engine() -> PivotEngine {
        create_engine(vec![
            sale("A", "Jan", 10.0),
            sale("A", "Feb", 5.0),
            sale("B", "Jan", 7.0),
            sale("A", "Jan", 3.0),
        ])
    }
}
