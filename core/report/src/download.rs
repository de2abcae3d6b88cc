//! FILENAME: core/report/src/download.rs
//! Download - a rendered report plus the headers needed to serve it.
//!
//! The caller owns the response: it sends `headers()`, then streams the body
//! with `write_to`. Nothing here touches the process or global output.

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use pivot_engine::{log_info, PivotEngine};

use crate::csv_writer::CsvRenderer;
use crate::html::HtmlRenderer;
use crate::options::{CsvOptions, HtmlOptions, PdfDisposition, PdfOptions};
use crate::pdf_writer::PdfRenderer;
use crate::{Renderer, ReportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Attachment,
    Inline,
}

impl Disposition {
    fn as_str(&self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub disposition: Disposition,
    pub body: Vec<u8>,
}

impl Download {
    /// Renders with any renderer into an in-memory download.
    pub fn render(
        renderer: &dyn Renderer,
        title: &str,
        engine: &PivotEngine,
        filename: String,
        disposition: Disposition,
    ) -> Result<Self, ReportError> {
        let mut body = Vec::new();
        renderer.render(title, engine, &mut body)?;

        log_info!(
            "REPORT",
            "export {} filename={} bytes={}",
            renderer.extension(),
            filename,
            body.len()
        );

        Ok(Download {
            filename,
            content_type: renderer.content_type(),
            disposition,
            body,
        })
    }

    /// CSV attachment. Without a filename, one is derived from the title.
    pub fn csv(
        title: &str,
        engine: &PivotEngine,
        filename: Option<&str>,
        options: &CsvOptions,
    ) -> Result<Self, ReportError> {
        let filename = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_filename(title, "csv", now()),
        };
        let renderer = CsvRenderer::new(options.clone());
        Self::render(&renderer, title, engine, filename, Disposition::Attachment)
    }

    /// PDF served inline or as an attachment, per `options.disposition`.
    pub fn pdf(title: &str, engine: &PivotEngine, options: &PdfOptions) -> Result<Self, ReportError> {
        let (filename, disposition) = match &options.disposition {
            PdfDisposition::Attachment(Some(name)) if !name.is_empty() => {
                (name.clone(), Disposition::Attachment)
            }
            PdfDisposition::Attachment(_) => (default_filename(title, "pdf", now()), Disposition::Attachment),
            PdfDisposition::Inline => (default_filename(title, "pdf", now()), Disposition::Inline),
        };
        let renderer = PdfRenderer::new(options.clone());
        Self::render(&renderer, title, engine, filename, disposition)
    }

    /// HTML page served inline.
    pub fn html(title: &str, engine: &PivotEngine, options: &HtmlOptions) -> Result<Self, ReportError> {
        let renderer = HtmlRenderer::new(options.clone());
        let filename = default_filename(title, "html", now());
        Self::render(&renderer, title, engine, filename, Disposition::Inline)
    }

    /// `Content-Type` and `Content-Disposition` header pairs.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type.to_string()),
            ("Content-Disposition", self.content_disposition()),
        ]
    }

    pub fn content_disposition(&self) -> String {
        format!(
            "{}; filename=\"{}\";",
            self.disposition.as_str(),
            header_safe(&self.filename)
        )
    }

    /// Streams the body into `out` and flushes it.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), ReportError> {
        out.write_all(&self.body)?;
        out.flush()?;
        Ok(())
    }
}

/// Drops quotes and control characters (CR/LF included) so a filename taken
/// from a title cannot break out of the header value.
fn header_safe(filename: &str) -> String {
    filename.chars().filter(|c| *c != '"' && !c.is_control()).collect()
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `"{title}.{ext}"`, or `"{ext}_download_{YYYYmmddHHMMSS}.{ext}"` when the
/// title is empty.
pub fn default_filename(title: &str, extension: &str, at: NaiveDateTime) -> String {
    if title.is_empty() {
        format!("{}_download_{}.{}", extension, at.format("%Y%m%d%H%M%S"), extension)
    } else {
        format!("{}.{}", title, extension)
    }
}
