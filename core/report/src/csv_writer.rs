//! FILENAME: core/report/src/csv_writer.rs
//! CSV renderer.
//!
//! Layout:
//! - header:  "", column labels..., "total"
//! - data:    row label, cells (blank when absent)..., row total
//! - summary: "Total", column totals..., grand total

use std::io::Write;

use pivot_engine::{log_debug, PivotEngine};

use crate::options::CsvOptions;
use crate::view::{PivotView, ViewCaptions};
use crate::{Renderer, ReportError};

#[derive(Debug, Clone, Default)]
pub struct CsvRenderer {
    pub options: CsvOptions,
}

impl CsvRenderer {
    pub fn new(options: CsvOptions) -> Self {
        CsvRenderer { options }
    }

    /// Renders into an in-memory buffer.
    pub fn to_bytes(&self, engine: &PivotEngine) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        self.write(engine, &mut buffer)?;
        Ok(buffer)
    }

    /// Streams the CSV into any writer and flushes it.
    pub fn write<W: Write>(&self, engine: &PivotEngine, sink: W) -> Result<(), ReportError> {
        let captions = ViewCaptions {
            total_header: &self.options.total_label,
            summary_label: &self.options.summary_label,
        };
        let view = PivotView::build(engine, captions);

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .from_writer(sink);

        for row in view.to_strings() {
            wtr.write_record(&row)?;
        }
        wtr.flush()?;

        log_debug!("REPORT", "csv rendered rows={}", view.row_count());
        Ok(())
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, _title: &str, engine: &PivotEngine, sink: &mut dyn Write) -> Result<(), ReportError> {
        self.write(engine, sink)
    }

    fn content_type(&self) -> &'static str {
        "application/csv"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_duplicate_engine, create_engine, create_test_engine};
    use dataset::Record;

    fn render(renderer: &CsvRenderer, engine: &PivotEngine) -> String {
        String::from_utf8(renderer.to_bytes(engine).unwrap()).unwrap()
    }

    #[test]
    fn test_basic_csv() {
        let csv = render(&CsvRenderer::default(), &create_test_engine());
        assert_eq!(csv, ",Jan,Feb,total\nA,10,5,15\nB,7,,7\nTotal,17,5,22\n");
    }

    #[test]
    fn test_duplicate_pairs() {
        let csv = render(&CsvRenderer::default(), &create_duplicate_engine());
        assert_eq!(csv, ",Jan,Feb,total\nA,10,5,18\nB,7,,7\nTotal,20,5,25\n");
    }

    #[test]
    fn test_custom_delimiter() {
        let renderer = CsvRenderer::new(CsvOptions {
            delimiter: b';',
            ..CsvOptions::default()
        });
        let csv = render(&renderer, &create_test_engine());
        assert_eq!(csv.lines().next(), Some(";Jan;Feb;total"));
        assert_eq!(csv.lines().last(), Some("Total;17;5;22"));
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let engine = create_engine(vec![
            Record::new().with("region", "North, East").with("month", "Jan").with("amount", 2.5),
        ]);
        let csv = render(&CsvRenderer::default(), &engine);
        assert_eq!(csv, ",Jan,total\n\"North, East\",2.5,2.5\nTotal,2.5,2.5\n");
    }

    #[test]
    fn test_empty_engine() {
        let csv = render(&CsvRenderer::default(), &create_engine(Vec::new()));
        assert_eq!(csv, ",total\nTotal,0\n");
    }

    #[test]
    fn test_render_through_trait() {
        let renderer = CsvRenderer::default();
        let mut out: Vec<u8> = Vec::new();
        renderer.render("ignored", &create_test_engine(), &mut out).unwrap();
        assert!(out.starts_with(b",Jan,Feb,total\n"));
        assert_eq!(renderer.content_type(), "application/csv");
    }
}
