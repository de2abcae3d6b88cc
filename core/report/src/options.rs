//! FILENAME: core/report/src/options.rs
//! Renderer options.
//!
//! Every renderer takes a small serde struct so report settings can live in
//! the same JSON document as the pivot definition. Missing keys fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};

use crate::ReportError;

/// CSS class applied to the table when none is configured.
pub const DEFAULT_TABLE_CLASS: &str = "reportTable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// CSS class on the `<table>` element.
    pub class: String,
    /// Prefix the output with the stock `<style>` block.
    pub include_default_css: bool,
    /// Emit the title as an `<h1>` above the table.
    pub show_title: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            class: DEFAULT_TABLE_CLASS.to_string(),
            include_default_css: false,
            show_title: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter byte (e.g. b',' or b';').
    pub delimiter: u8,
    /// Heading of the trailing row-total column.
    pub total_label: String,
    /// Label of the trailing summary row.
    pub summary_label: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            total_label: "total".to_string(),
            summary_label: "Total".to_string(),
        }
    }
}

/// How a PDF should be offered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfDisposition {
    /// Displayed in the browser.
    Inline,
    /// Downloaded; `None` picks a name from the title.
    Attachment(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    /// Body font size in points.
    pub font_size: i64,
    /// Page margin in points, applied on all four sides.
    pub margin: i64,
    pub disposition: PdfDisposition,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            font_size: 10,
            margin: 28,
            disposition: PdfDisposition::Attachment(None),
        }
    }
}

/// All renderer options together, as loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub html: HtmlOptions,
    pub csv: CsvOptions,
    pub pdf: PdfOptions,
}

impl ReportOptions {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }
}
