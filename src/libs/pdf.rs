//! PDF rendering sink for formatted reports.
//!
//! Takes the report formatter's section sequence and produces a single
//! in-memory PDF document: title block, then one table per section,
//! paginated onto US-letter pages with built-in Helvetica fonts. The
//! layout is a fixed template; callers only rely on "sections in,
//! bytes out, or a clean error" — a failure yields [`SinkError`] and
//! no bytes, never a panic into the caller.

use crate::libs::report::{Report, ReportSection};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH_MM: f64 = 215.9;
const PAGE_HEIGHT_MM: f64 = 279.4;
const MARGIN_MM: f64 = 18.0;

const TITLE_SIZE: f64 = 24.0;
const SUBTITLE_SIZE: f64 = 13.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 9.5;

const TITLE_STEP_MM: f64 = 12.0;
const HEADING_STEP_MM: f64 = 9.0;
const ROW_STEP_MM: f64 = 6.0;
const SECTION_GAP_MM: f64 = 6.0;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

/// Renders a [`Report`] into PDF bytes.
pub struct PdfSink;

impl PdfSink {
    pub fn render(report: &Report) -> Result<Vec<u8>, SinkError> {
        let (doc, page, layer) = PdfDocument::new(report.title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let body_font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold_font = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let mut cursor = Cursor {
            doc,
            layer: None,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };
        cursor.layer = Some(cursor.doc.get_page(page).get_layer(layer));

        cursor.text(&report.title, TITLE_SIZE, MARGIN_MM, &bold_font);
        cursor.advance(TITLE_STEP_MM);
        cursor.text(&format!("Analytics report for {}", report.username), SUBTITLE_SIZE, MARGIN_MM, &body_font);
        cursor.advance(HEADING_STEP_MM);
        cursor.text(&format!("Generated on: {}", report.generated_at), BODY_SIZE, MARGIN_MM, &body_font);
        cursor.advance(HEADING_STEP_MM + SECTION_GAP_MM);

        for section in &report.sections {
            render_section(&mut cursor, section, &body_font, &bold_font);
        }

        let bytes = cursor.doc.save_to_bytes()?;
        Ok(bytes)
    }
}

fn render_section(cursor: &mut Cursor, section: &ReportSection, body_font: &IndirectFontRef, bold_font: &IndirectFontRef) {
    // Keep the heading and at least the header row together.
    cursor.ensure_room(HEADING_STEP_MM + 2.0 * ROW_STEP_MM);

    cursor.text(&section.title, HEADING_SIZE, MARGIN_MM, bold_font);
    cursor.advance(HEADING_STEP_MM);

    let columns = section.header.len().max(1);
    let column_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / columns as f64;

    cursor.row(&section.header, column_width, bold_font);
    for row in &section.rows {
        cursor.ensure_room(ROW_STEP_MM);
        cursor.row(row, column_width, body_font);
    }
    cursor.advance(SECTION_GAP_MM);
}

struct Cursor {
    doc: PdfDocumentReference,
    layer: Option<PdfLayerReference>,
    y: f64,
}

impl Cursor {
    fn text(&mut self, text: &str, size: f64, x: f64, font: &IndirectFontRef) {
        if let Some(layer) = &self.layer {
            layer.use_text(text, size, Mm(x), Mm(self.y), font);
        }
    }

    fn row(&mut self, cells: &[String], column_width: f64, font: &IndirectFontRef) {
        for (i, cell) in cells.iter().enumerate() {
            self.text(cell, BODY_SIZE, MARGIN_MM + i as f64 * column_width, font);
        }
        self.advance(ROW_STEP_MM);
    }

    fn advance(&mut self, step: f64) {
        self.y -= step;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN_MM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = Some(self.doc.get_page(page).get_layer(layer));
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }
}
