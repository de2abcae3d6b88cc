//! FILENAME: core/report/src/html.rs
//! HTML table renderer.

use std::io::Write;

use pivot_engine::{log_debug, PivotEngine};

use crate::options::HtmlOptions;
use crate::view::{PivotCellType, PivotView, PivotViewCell, ViewCaptions};
use crate::{Renderer, ReportError};

/// Stock stylesheet for the `reportTable` class.
const DEFAULT_CSS: &str = r#"<style>
h1 {
    text-align:center;
}
.reportTable {
    width: 100%;
}
.reportTable th, .reportTable td {
    padding: 3px 5px 3px 5px;
}
.reportTable th.header {
    text-align: center;
}
.reportTable th.data, .reportTable td.data {
    text-align: right;
}
.reportTable tr:nth-child(even) {background: #e3e3e3}
.reportTable tr:nth-child(odd) {background: #FFF}
</style>"#;

pub fn default_css() -> &'static str {
    DEFAULT_CSS
}

/// Renders the pivot as an HTML `<table>`, preceded by an `<h1>` title.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub options: HtmlOptions,
}

impl HtmlRenderer {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlRenderer { options }
    }

    /// Builds the complete HTML fragment as a string.
    pub fn to_html(&self, title: &str, engine: &PivotEngine) -> String {
        let view = PivotView::build(engine, ViewCaptions::default());
        let mut html = String::new();

        if self.options.include_default_css {
            html.push_str(DEFAULT_CSS);
        }
        if self.options.show_title {
            html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
        }
        html.push_str(&format!(
            r#"<table border="1" class="{}">"#,
            escape_html(&self.options.class)
        ));

        for row in &view.rows {
            html.push_str("<tr>");
            for cell in &row.cells {
                html.push_str(&render_cell(cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");

        log_debug!("REPORT", "html rendered rows={} bytes={}", view.row_count(), html.len());
        html
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, title: &str, engine: &PivotEngine, sink: &mut dyn Write) -> Result<(), ReportError> {
        sink.write_all(self.to_html(title, engine).as_bytes())?;
        Ok(())
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

fn render_cell(cell: &PivotViewCell) -> String {
    let text = escape_html(&cell.display());
    match cell.cell_type {
        PivotCellType::Corner => "<th>&nbsp;</th>".to_string(),
        PivotCellType::ColumnHeader => format!(r#"<th class="header">{}</th>"#, text),
        PivotCellType::TotalHeader => format!("<th>{}</th>", text),
        PivotCellType::RowHeader => format!("<td>{}</td>", text),
        PivotCellType::Data | PivotCellType::RowTotal => format!(r#"<td class="data">{}</td>"#, text),
        PivotCellType::SummaryLabel => format!(r#"<th class="bottomRow">{}</th>"#, text),
        PivotCellType::ColumnTotal | PivotCellType::GrandTotal => {
            format!(r#"<th class="data bottomRow">{}</th>"#, text)
        }
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
