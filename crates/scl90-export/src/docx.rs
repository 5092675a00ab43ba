use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::ReportStyles;

/// Generate a DOCX document from a rendered Markdown summary.
///
/// Understands the subset the summary template emits:
/// `#`/`##`/`###` headings, `- ` bullets, `**bold**` runs, and `---` as a
/// page break. Everything else becomes a body paragraph.
pub fn generate_docx(rendered: &str, styles: &ReportStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.title_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading_size - 1.0));

    for line in rendered.lines() {
        let trimmed = line.trim();
        let paragraph = if trimmed.is_empty() {
            Paragraph::new()
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            heading_paragraph(text, "Heading3")
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            heading_paragraph(text, "Heading2")
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            heading_paragraph(text, "Heading1")
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            let bullet = body_run("\u{2022} ", styles);
            inline_runs(text, styles)
                .into_iter()
                .fold(Paragraph::new().add_run(bullet), Paragraph::add_run)
        } else if trimmed == "---" {
            Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        } else {
            inline_runs(trimmed, styles)
                .into_iter()
                .fold(Paragraph::new(), Paragraph::add_run)
        };
        docx = docx.add_paragraph(paragraph.align(AlignmentType::Left));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    tracing::debug!(bytes = buf.get_ref().len(), "DOCX summary generated");
    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: f32) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(half_points(size_pt))
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn body_run(text: &str, styles: &ReportStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(half_points(styles.body_size))
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split on `**` markers; odd segments are bold.
fn inline_runs(text: &str, styles: &ReportStyles) -> Vec<Run> {
    text.split("**")
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| {
            let run = body_run(segment, styles);
            if i % 2 == 1 { run.bold() } else { run }
        })
        .collect()
}

// OOXML font sizes are in half-points.
fn half_points(size_pt: f32) -> usize {
    (size_pt * 2.0).round() as usize
}
