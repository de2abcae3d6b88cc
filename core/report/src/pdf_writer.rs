//! FILENAME: core/report/src/pdf_writer.rs
//! PDF renderer.
//!
//! Lays the pivot view out as a text table on A4 portrait pages using the
//! built-in Helvetica fonts. The title is printed once, at the top of the
//! first page. When a page fills up the header row is repeated on the next.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use pivot_engine::{log_debug, PivotEngine};

use crate::options::PdfOptions;
use crate::view::{PivotRowType, PivotView, PivotViewRow, ViewCaptions};
use crate::{Renderer, ReportError};

/// A4 portrait, in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

/// Vertical padding added to the font size for each table row.
const ROW_PADDING: i64 = 6;

/// Accepted body font sizes, in points.
const MIN_FONT_SIZE: i64 = 4;
const MAX_FONT_SIZE: i64 = 72;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    pub options: PdfOptions,
}

impl PdfRenderer {
    pub fn new(options: PdfOptions) -> Self {
        PdfRenderer { options }
    }

    pub fn to_bytes(&self, title: &str, engine: &PivotEngine) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        self.write(title, engine, &mut buffer)?;
        Ok(buffer)
    }

    pub fn write<W: Write>(&self, title: &str, engine: &PivotEngine, mut sink: W) -> Result<(), ReportError> {
        let view = PivotView::build(engine, ViewCaptions::default());
        let layout = Layout::new(&self.options, view.col_count);
        let pages = layout.paginate(title, &view);

        let mut doc = self.assemble(title, pages)?;
        doc.compress();
        doc.save_to(&mut sink)?;

        log_debug!("REPORT", "pdf rendered rows={} pages={}", view.row_count(), doc.get_pages().len());
        Ok(())
    }

    /// Wraps the per-page operation lists into a PDF document.
    fn assemble(&self, title: &str, pages: Vec<Vec<Operation>>) -> Result<Document, ReportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => regular_id,
                FONT_BOLD => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let info_id: ObjectId = doc.add_object(dictionary! {
            "Title" => Object::string_literal(pdf_text(title)),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, title: &str, engine: &PivotEngine, sink: &mut dyn Write) -> Result<(), ReportError> {
        self.write(title, engine, sink)
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Page geometry derived from the options and the column count.
struct Layout {
    font_size: i64,
    margin: i64,
    row_height: i64,
    col_width: i64,
    /// Characters that fit in one column at the body font size.
    max_chars: usize,
}

impl Layout {
    fn new(options: &PdfOptions, col_count: usize) -> Self {
        let font_size = options.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let margin = options.margin.clamp(0, PAGE_WIDTH / 4);
        let usable = PAGE_WIDTH - 2 * margin;
        let col_width = (usable / col_count.max(1) as i64).max(1);
        // Helvetica glyphs average a little over half an em.
        let max_chars = ((col_width - 4) * 2 / font_size).max(1) as usize;

        Layout {
            font_size,
            margin,
            row_height: font_size + ROW_PADDING,
            col_width,
            max_chars,
        }
    }

    fn title_size(&self) -> i64 {
        self.font_size + 6
    }

    /// Splits the view into pages of drawing operations.
    fn paginate(&self, title: &str, view: &PivotView) -> Vec<Vec<Operation>> {
        let top = PAGE_HEIGHT - self.margin;
        let bottom = self.margin;
        let header = view.rows.iter().find(|r| r.row_type == PivotRowType::Header);

        let mut pages = Vec::new();
        let mut ops = Vec::new();
        let mut y = top;

        if !title.is_empty() {
            y -= self.title_size();
            self.text(&mut ops, FONT_BOLD, self.title_size(), self.margin, y, title);
            y -= self.row_height;
        }

        for row in &view.rows {
            if y - self.row_height < bottom {
                pages.push(std::mem::take(&mut ops));
                y = top;
                if row.row_type != PivotRowType::Header {
                    if let Some(header) = header {
                        y = self.draw_row(&mut ops, header, y);
                    }
                }
            }
            y = self.draw_row(&mut ops, row, y);
        }
        pages.push(ops);
        pages
    }

    /// Draws one table row below `y` and returns the new baseline.
    fn draw_row(&self, ops: &mut Vec<Operation>, row: &PivotViewRow, y: i64) -> i64 {
        let baseline = y - self.row_height + ROW_PADDING / 2;
        let font = match row.row_type {
            PivotRowType::Data => FONT_REGULAR,
            PivotRowType::Header | PivotRowType::Summary => FONT_BOLD,
        };

        for (i, cell) in row.cells.iter().enumerate() {
            let text = truncate(&cell.display(), self.max_chars);
            if text.is_empty() {
                continue;
            }
            let left = self.margin + i as i64 * self.col_width;
            let x = if cell.cell_type.is_numeric() {
                // Right-align numbers inside the column.
                let width = text.chars().count() as i64 * self.font_size * 5 / 9;
                (left + self.col_width - 2 - width).max(left + 2)
            } else {
                left + 2
            };
            self.text(ops, font, self.font_size, x, baseline, &text);
        }

        let line_y = y - self.row_height;
        if row.row_type != PivotRowType::Data {
            self.rule(ops, line_y);
        }
        if row.row_type == PivotRowType::Summary {
            self.rule(ops, y);
        }
        line_y
    }

    fn text(&self, ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
        ));
        ops.push(Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(pdf_text(text))]));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Horizontal rule across the table width.
    fn rule(&self, ops: &mut Vec<Operation>, y: i64) {
        ops.push(Operation::new("m", vec![Object::Integer(self.margin), Object::Integer(y)]));
        ops.push(Operation::new(
            "l",
            vec![Object::Integer(PAGE_WIDTH - self.margin), Object::Integer(y)],
        ));
        ops.push(Operation::new("S", vec![]));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// Encodes text for the WinAnsiEncoding Type1 fonts. ASCII and the Latin-1
/// range 0xA0-0xFF map to themselves, the typographic characters WinAnsi
/// places in 0x80-0x9F are translated, and everything else prints as '?'.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
        '\u{20ac}' => 0x80, // euro
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2030}' => 0x89,
        '\u{2039}' => 0x8b,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{2122}' => 0x99,
        '\u{203a}' => 0x9b,
        _ => b'?',
    }
}
