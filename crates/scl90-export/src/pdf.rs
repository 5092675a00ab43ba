use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon,
};

use scl90_core::models::evaluation::Evaluation;
use scl90_instruments::profile::ScoreProfile;

use crate::chart::{wrap_label, Bar, Histogram, ProfileChart};
use crate::error::ExportError;
use crate::metrics::{pt_to_mm, text_width_mm, FontFace};
use crate::report::{Emphasis, ReportContent, Tone};
use crate::styles::{Palette, ReportStyles, Rgb};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LAYER: &str = "Layer 1";

/// Items per column in the response grid.
const GRID_ROWS: usize = 30;

/// Generate the A4 PDF report for a scored evaluation.
///
/// Sections, in order: title, respondent header, response grid, global
/// indices, dimension table, profile chart and (if enabled in `styles`)
/// the response distribution. A section that does not fit on the current
/// page starts a new one.
pub fn generate_pdf(
    evaluation: &Evaluation,
    profile: &ScoreProfile,
    styles: &ReportStyles,
) -> Result<Vec<u8>, ExportError> {
    let content = ReportContent::build(evaluation, profile);
    let mut canvas = Canvas::new(&content.title, styles)?;

    write_title(&mut canvas, &content);
    write_header(&mut canvas, &content);
    write_responses(&mut canvas, &content);
    write_global_indices(&mut canvas, &content);
    write_dimension_table(&mut canvas, &content);

    let chart = ProfileChart::from_profile(profile, styles)?;
    draw_profile_chart(&mut canvas, &chart);

    if styles.include_histogram {
        let histogram = Histogram::from_profile(profile, styles)?;
        draw_histogram(&mut canvas, &histogram);
    }

    let pages = canvas.pages;
    let bytes = canvas.finish()?;
    tracing::info!(
        evaluation_id = %evaluation.id,
        pages,
        bytes = bytes.len(),
        "PDF report generated"
    );
    Ok(bytes)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
    mono_bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Mono => &self.mono,
            FontFace::MonoBold => &self.mono_bold,
        }
    }
}

/// A page cursor over a printpdf document. Coordinates are millimetres
/// from the bottom-left corner; `y` is the top of the next block.
struct Canvas<'a> {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    styles: &'a ReportStyles,
    palette: Palette,
    y: f32,
    pages: usize,
}

impl<'a> Canvas<'a> {
    fn new(title: &str, styles: &'a ReportStyles) -> Result<Self, ExportError> {
        let palette = Palette::from_styles(styles)?;
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = Fonts {
            regular: add_font(&doc, BuiltinFont::Helvetica)?,
            bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
            mono: add_font(&doc, BuiltinFont::Courier)?,
            mono_bold: add_font(&doc, BuiltinFont::CourierBold)?,
        };

        Ok(Self {
            doc,
            layer,
            fonts,
            styles,
            palette,
            y: PAGE_HEIGHT - styles.margin_mm,
            pages: 1,
        })
    }

    fn left(&self) -> f32 {
        self.styles.margin_mm
    }

    fn content_width(&self) -> f32 {
        PAGE_WIDTH - 2.0 * self.styles.margin_mm
    }

    /// Start a new page unless `height` millimetres remain above the
    /// bottom margin.
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < self.styles.margin_mm {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - self.styles.margin_mm;
            self.pages += 1;
            tracing::debug!(page = self.pages, "started new PDF page");
        }
    }

    fn text(&self, x: f32, y: f32, text: &str, face: FontFace, size: f32, color: Rgb) {
        self.layer.set_fill_color(color_of(color));
        self.layer
            .use_text(text, size, Mm(x), Mm(y), self.fonts.get(face));
    }

    fn text_centered(&self, cx: f32, y: f32, text: &str, face: FontFace, size: f32, color: Rgb) {
        let width = text_width_mm(text, face, size);
        self.text(cx - width / 2.0, y, text, face, size, color);
    }

    fn text_right(&self, rx: f32, y: f32, text: &str, face: FontFace, size: f32, color: Rgb) {
        let width = text_width_mm(text, face, size);
        self.text(rx - width, y, text, face, size, color);
    }

    /// Bold label immediately followed by a regular value.
    fn labelled(&self, x: f32, y: f32, label: &str, value: &str, size: f32) {
        self.text(x, y, label, FontFace::Bold, size, Rgb::BLACK);
        let offset = text_width_mm(label, FontFace::Bold, size) + 1.0;
        self.text(x + offset, y, value, FontFace::Regular, size, Rgb::BLACK);
    }

    /// Rectangle with its bottom-left corner at `(x, y)`.
    fn rect(&self, x: f32, y: f32, w: f32, h: f32, fill: Option<Rgb>, stroke: Option<(Rgb, f32)>) {
        let mode = match (fill, stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, _) => PaintMode::Stroke,
        };
        if let Some(color) = fill {
            self.layer.set_fill_color(color_of(color));
        }
        if let Some((color, thickness)) = stroke {
            self.layer.set_outline_color(color_of(color));
            self.layer.set_outline_thickness(thickness);
        }
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                point(x, y),
                point(x + w, y),
                point(x + w, y + h),
                point(x, y + h),
            ]],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn polyline(&self, points: &[(f32, f32)], color: Rgb, thickness: f32, dashed: bool) {
        self.layer.set_outline_color(color_of(color));
        self.layer.set_outline_thickness(thickness);
        if dashed {
            self.layer.set_line_dash_pattern(LineDashPattern {
                dash_1: Some(6),
                gap_1: Some(3),
                ..Default::default()
            });
        }
        self.layer.add_line(Line {
            points: points.iter().map(|(x, y)| point(*x, *y)).collect(),
            is_closed: false,
        });
        if dashed {
            self.layer.set_line_dash_pattern(LineDashPattern::default());
        }
    }

    fn dot(&self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        const SEGMENTS: usize = 16;
        let ring = (0..SEGMENTS)
            .map(|i| {
                let angle = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
                point(cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect();
        self.layer.set_fill_color(color_of(color));
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.ensure_space(pt_to_mm(size) + 4.0);
        self.y -= pt_to_mm(size);
        self.text(self.left(), self.y, text, FontFace::Bold, size, Rgb::BLACK);
        self.y -= 4.0;
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ExportError::Pdf(format!("save failed: {e}")))?;
        buf.into_inner()
            .map_err(|e| ExportError::Pdf(format!("buffer flush failed: {e}")))
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))
}

fn color_of(c: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(c.r, c.g, c.b, None))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

fn write_title(canvas: &mut Canvas<'_>, content: &ReportContent) {
    let size = canvas.styles.title_size;
    canvas.y -= pt_to_mm(size);
    canvas.text_centered(
        PAGE_WIDTH / 2.0,
        canvas.y,
        &content.title,
        FontFace::Bold,
        size,
        Rgb::BLACK,
    );
    canvas.y -= 8.0;
}

fn write_header(canvas: &mut Canvas<'_>, content: &ReportContent) {
    let size = canvas.styles.body_size;
    let line = pt_to_mm(size) + 3.0;
    let left = canvas.left();

    canvas.y -= pt_to_mm(size);
    canvas.labelled(left, canvas.y, "Name:", &content.name, size);
    canvas.labelled(left + 92.0, canvas.y, "Sex:", &content.sex, size);
    canvas.labelled(left + 122.0, canvas.y, "Date:", &content.date, size);
    canvas.y -= line;
    canvas.labelled(left, canvas.y, "Evaluator:", &content.evaluator, size);
    canvas.y -= 8.0;
}

fn write_responses(canvas: &mut Canvas<'_>, content: &ReportContent) {
    let size = canvas.styles.response_grid_size;
    let heading_size = canvas.styles.heading_size - 1.0;
    let row_h = pt_to_mm(size + 4.0);
    let col_w = pt_to_mm(140.0);
    let columns = content.responses.len().div_ceil(GRID_ROWS);
    let grid_h = row_h * GRID_ROWS as f32;

    canvas.ensure_space(pt_to_mm(heading_size) + 4.0 + grid_h);
    canvas.heading(&format!("Responses of {}", content.name), heading_size);
    let top = canvas.y;
    let left = canvas.left();
    let palette = canvas.palette;

    for col in 0..columns {
        for row in 0..GRID_ROWS {
            let Some(cell) = content.responses.get(col * GRID_ROWS + row) else {
                continue;
            };
            let x = left + col as f32 * col_w;
            let y = top - (row + 1) as f32 * row_h;
            canvas.rect(x, y, col_w, row_h, None, Some((Rgb::GRID, 0.25)));

            let baseline = y + pt_to_mm(2.5);
            let label = cell.label();
            canvas.text(x + 1.8, baseline, &label, FontFace::Mono, size, Rgb::BLACK);

            let (face, color) = match cell.tone {
                Tone::Alert => (FontFace::MonoBold, palette.alert),
                Tone::Muted => (FontFace::Mono, Rgb::GREY),
                Tone::Normal => (FontFace::Mono, Rgb::BLACK),
            };
            let value_x = x + 1.8 + text_width_mm(&label, FontFace::Mono, size);
            canvas.text(value_x, baseline, &cell.value.to_string(), face, size, color);
        }
    }

    canvas.y = top - grid_h - 12.0;
}

fn write_global_indices(canvas: &mut Canvas<'_>, content: &ReportContent) {
    canvas.heading("Global Indices", canvas.styles.heading_size);

    let size = canvas.styles.body_size;
    let left = canvas.left();
    let alert = canvas.palette.alert;

    for line in &content.indices {
        canvas.ensure_space(6.0);
        canvas.y -= pt_to_mm(size);
        let label = format!("- {}:", line.label);
        canvas.text(left + 2.0, canvas.y, &label, FontFace::Regular, size, Rgb::BLACK);

        let (face, color) = match line.emphasis {
            Emphasis::Plain => (FontFace::Regular, Rgb::BLACK),
            Emphasis::Bold => (FontFace::Bold, Rgb::BLACK),
            Emphasis::Alert => (FontFace::Bold, alert),
        };
        canvas.text(left + 82.0, canvas.y, &line.value, face, size, color);
        canvas.text(left + 96.0, canvas.y, &line.note, FontFace::Regular, size - 1.0, Rgb::BLACK);
        canvas.y -= 2.5;
    }

    canvas.y -= 6.0;
}

fn write_dimension_table(canvas: &mut Canvas<'_>, content: &ReportContent) {
    let size = canvas.styles.body_size;
    let heading_size = canvas.styles.heading_size;
    let row_h = 6.5;
    let widths = [200.0, 80.0, 80.0, 80.0].map(pt_to_mm);
    let table_h = row_h * (content.dimensions.len() + 1) as f32;

    canvas.ensure_space(pt_to_mm(heading_size) + 4.0 + table_h);
    canvas.heading(&format!("Scores by Dimension ({})", content.norms_name), heading_size);

    let left = canvas.left();
    let palette = canvas.palette;
    let header = ["Dimension", "Mean", "Clinical cutoff", "Status"];

    let mut row_top = canvas.y;
    let mut x = left;
    for (i, title) in header.iter().enumerate() {
        canvas.rect(x, row_top - row_h, widths[i], row_h, Some(palette.accent), Some((Rgb::GREY, 0.5)));
        let baseline = row_top - row_h + 2.0;
        if i == 0 {
            canvas.text(x + 2.0, baseline, title, FontFace::Bold, size, Rgb::WHITE);
        } else {
            canvas.text_centered(x + widths[i] / 2.0, baseline, title, FontFace::Bold, size, Rgb::WHITE);
        }
        x += widths[i];
    }
    row_top -= row_h;

    for row in &content.dimensions {
        let cells = [&row.name, &row.mean, &row.cutoff, &row.status];
        let mut x = left;
        for (i, text) in cells.iter().enumerate() {
            canvas.rect(x, row_top - row_h, widths[i], row_h, Some(palette.table_body), Some((Rgb::GREY, 0.5)));
            let baseline = row_top - row_h + 2.0;
            if i == 0 {
                canvas.text(x + 2.0, baseline, text, FontFace::Regular, size, Rgb::BLACK);
            } else {
                let (face, color) = if i == 3 && row.clinical {
                    (FontFace::Bold, palette.alert)
                } else {
                    (FontFace::Regular, Rgb::BLACK)
                };
                canvas.text_centered(x + widths[i] / 2.0, baseline, text, face, size, color);
            }
            x += widths[i];
        }
        row_top -= row_h;
    }

    canvas.y = row_top - 12.0;
}

/// Plot rectangle of a chart and its value scale.
struct PlotArea {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    y_max: f64,
}

impl PlotArea {
    fn y_at(&self, value: f64) -> f32 {
        let ratio = (value / self.y_max).clamp(0.0, 1.0) as f32;
        self.y0 + ratio * (self.y1 - self.y0)
    }

    fn slot(&self, count: usize) -> f32 {
        (self.x1 - self.x0) / count.max(1) as f32
    }

    fn slot_center(&self, count: usize, index: usize) -> f32 {
        self.x0 + (index as f32 + 0.5) * self.slot(count)
    }
}

/// Gridlines, y tick labels, axes and bars. Annotations go on top.
fn draw_bars(canvas: &Canvas<'_>, area: &PlotArea, bars: &[Bar], y_step: f64) {
    let tick_size = 7.0;
    let mut tick = 0.0;
    while tick <= area.y_max + 1e-9 {
        let y = area.y_at(tick);
        if tick > 0.0 {
            canvas.polyline(&[(area.x0, y), (area.x1, y)], Rgb::GRID, 0.5, false);
        }
        canvas.text_right(
            area.x0 - 1.5,
            y - 1.0,
            &format!("{tick:.0}"),
            FontFace::Regular,
            tick_size,
            Rgb::BLACK,
        );
        tick += y_step;
    }

    let slot = area.slot(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let x = area.x0 + i as f32 * slot + slot * 0.1;
        let top = area.y_at(bar.value);
        if top > area.y0 {
            canvas.rect(
                x,
                area.y0,
                slot * 0.8,
                top - area.y0,
                Some(bar.color),
                Some((Rgb::BLACK, 0.5)),
            );
        }
    }

    canvas.polyline(
        &[(area.x0, area.y1), (area.x0, area.y0), (area.x1, area.y0)],
        Rgb::BLACK,
        0.75,
        false,
    );
}

fn draw_profile_chart(canvas: &mut Canvas<'_>, chart: &ProfileChart) {
    let height = 100.0;
    let heading_size = canvas.styles.heading_size - 1.0;
    canvas.ensure_space(pt_to_mm(heading_size) + 4.0 + height);
    canvas.heading("Scores by Dimension", heading_size);

    let left = canvas.left();
    let width = canvas.content_width();
    let top = canvas.y;
    let bottom = top - height;
    let area = PlotArea {
        x0: left + 12.0,
        y0: bottom + 14.0,
        x1: left + width - 2.0,
        y1: top - 14.0,
        y_max: chart.y_max,
    };

    canvas.text_centered(left + width / 2.0, top - 5.0, &chart.title, FontFace::Bold, 10.0, Rgb::BLACK);
    canvas.text(area.x0, area.y1 + 2.5, &chart.y_label, FontFace::Regular, 7.0, Rgb::BLACK);

    draw_bars(canvas, &area, &chart.bars, 1.0);

    let n = chart.bars.len();
    for (i, bar) in chart.bars.iter().enumerate() {
        let cx = area.slot_center(n, i);
        if bar.labelled {
            let baseline = area.y_at(bar.value - 0.15);
            canvas.text_centered(cx, baseline, &format!("{:.2}", bar.value), FontFace::Regular, 8.0, Rgb::BLACK);
        }
        for (line_no, part) in wrap_label(&bar.label).iter().enumerate() {
            let y = area.y0 - 4.0 - line_no as f32 * 3.0;
            canvas.text_centered(cx, y, part, FontFace::Regular, 6.5, Rgb::BLACK);
        }
    }

    let cutoff_points: Vec<(f32, f32)> = chart
        .cutoffs
        .iter()
        .enumerate()
        .map(|(i, c)| (area.slot_center(n, i), area.y_at(*c)))
        .collect();
    canvas.polyline(&cutoff_points, chart.cutoff_color, 2.0, true);
    for (x, y) in &cutoff_points {
        canvas.dot(*x, *y, 0.9, chart.cutoff_color);
    }

    let legend_x = area.x1 - 62.0;
    let legend_y = area.y1 - 4.0;
    canvas.polyline(
        &[(legend_x, legend_y + 1.0), (legend_x + 8.0, legend_y + 1.0)],
        chart.cutoff_color,
        2.0,
        true,
    );
    canvas.text(legend_x + 10.0, legend_y, &chart.cutoff_label, FontFace::Regular, 7.5, Rgb::BLACK);

    canvas.y = bottom - 6.0;
}

fn draw_histogram(canvas: &mut Canvas<'_>, histogram: &Histogram) {
    let height = 70.0;
    let heading_size = canvas.styles.heading_size - 1.0;
    canvas.ensure_space(pt_to_mm(heading_size) + 4.0 + height);
    canvas.heading("Response distribution", heading_size);

    let left = canvas.left();
    let width = 110.0_f32.min(canvas.content_width());
    let top = canvas.y;
    let bottom = top - height;
    let y_max = histogram.y_max();
    let area = PlotArea {
        x0: left + 12.0,
        y0: bottom + 12.0,
        x1: left + width,
        y1: top - 12.0,
        y_max,
    };

    canvas.text_centered(left + width / 2.0, top - 5.0, &histogram.title, FontFace::Bold, 10.0, Rgb::BLACK);
    canvas.text(area.x0, area.y1 + 2.5, &histogram.y_label, FontFace::Regular, 7.0, Rgb::BLACK);

    draw_bars(canvas, &area, &histogram.bars, y_max / 5.0);

    let n = histogram.bars.len();
    for (i, bar) in histogram.bars.iter().enumerate() {
        let cx = area.slot_center(n, i);
        if bar.labelled {
            let baseline = area.y_at(bar.value) + 1.0;
            canvas.text_centered(cx, baseline, &format!("{:.0}", bar.value), FontFace::Regular, 7.0, Rgb::BLACK);
        }
        canvas.text_centered(cx, area.y0 - 4.0, &bar.label, FontFace::Regular, 8.0, Rgb::BLACK);
    }
    canvas.text_centered(
        (area.x0 + area.x1) / 2.0,
        area.y0 - 9.0,
        &histogram.x_label,
        FontFace::Regular,
        8.0,
        Rgb::BLACK,
    );

    canvas.y = bottom - 6.0;
}
