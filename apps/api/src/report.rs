//! Downloadable PDF report rendering.
//!
//! A report is a short paginated US-letter document: title, metadata block,
//! a truncated job-description excerpt, and the full analysis text. Text is
//! set in the built-in Helvetica faces and wrapped with a greedy
//! fixed-column breaker, so no external font files are required.

use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex,
};

use crate::analysis::AnalysisType;
use crate::errors::AppError;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;
const PT_TO_MM: f32 = 0.352_778;

const TITLE_PT: f32 = 18.0;
const HEADING_PT: f32 = 13.0;
const BODY_PT: f32 = 11.0;
const LINE_SPACING: f32 = 1.4;

/// Character budget for the job-description excerpt.
const JD_EXCERPT_CHARS: usize = 500;
/// Greedy wrap column for 11 pt Helvetica inside 1" margins.
const WRAP_COLUMNS: usize = 88;

/// File name for a downloaded report: `<slug>_<timestamp>.pdf`.
pub fn report_filename(analysis_type: AnalysisType, generated_at: DateTime<Local>) -> String {
    format!(
        "{}_{}.pdf",
        analysis_type.slug(),
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Build the report document in memory and return the raw PDF bytes.
pub fn build_report(
    analysis_type: AnalysisType,
    analysis: &str,
    job_description: &str,
    resume_filename: &str,
    generated_at: DateTime<Local>,
) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new(
        "ATS Resume Analysis Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let body = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;

    {
        let mut writer = PageWriter::new(&doc, page, layer);

        writer.line("ATS Resume Analysis Report", TITLE_PT, &bold);
        writer.gap(6.0);

        writer.line(
            &format!("Analysis Type: {}", analysis_type.label()),
            BODY_PT,
            &body,
        );
        writer.line(&format!("Resume File: {resume_filename}"), BODY_PT, &body);
        writer.line(
            &format!("Generated On: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            BODY_PT,
            &body,
        );
        writer.gap(8.0);

        writer.line("Job Description:", HEADING_PT, &bold);
        for line in wrap_text(&truncate_excerpt(job_description, JD_EXCERPT_CHARS), WRAP_COLUMNS)
        {
            writer.line(&line, BODY_PT, &body);
        }
        writer.gap(8.0);

        writer.line("Analysis Results:", HEADING_PT, &bold);
        for paragraph in analysis.lines() {
            if paragraph.trim().is_empty() {
                writer.gap(3.0);
                continue;
            }
            for line in wrap_text(paragraph, WRAP_COLUMNS) {
                writer.line(&line, BODY_PT, &body);
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Report rendering failed: {e}")))
}

fn builtin_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, AppError> {
    doc.add_builtin_font(font)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Report font unavailable: {e}")))
}

/// Cursor over the document that starts a fresh page when a line would land
/// inside the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Distance from the page bottom to the next baseline, in mm.
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, page: PdfPageIndex, layer: PdfLayerIndex) -> Self {
        Self {
            doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef) {
        let advance = size_pt * PT_TO_MM * LINE_SPACING;
        if self.y - advance < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.y -= advance;
        self.layer
            .use_text(text, size_pt, Mm(MARGIN_MM), Mm(self.y), font);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Truncate `text` to `max_chars` characters, appending an ellipsis marker
/// when anything was cut.
fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut excerpt: String = text.chars().take(max_chars).collect();
        excerpt.push_str("...");
        excerpt
    } else {
        text.to_string()
    }
}

/// Greedy word wrap at `max_cols` characters. Tokens longer than a full line
/// are hard-split so nothing ever overflows the margin.
fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_cols = 0usize;

    for word in text.split_whitespace() {
        let word_cols = word.chars().count();

        if word_cols > max_cols {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_cols = 0;
            }
            for c in word.chars() {
                if current_cols == max_cols {
                    lines.push(std::mem::take(&mut current));
                    current_cols = 0;
                }
                current.push(c);
                current_cols += 1;
            }
            continue;
        }

        if !current.is_empty() && current_cols + 1 + word_cols > max_cols {
            lines.push(std::mem::take(&mut current));
            current_cols = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_cols += 1;
        }
        current.push_str(word);
        current_cols += word_cols;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
