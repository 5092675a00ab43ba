//! Approximate text widths for the PDF base-14 fonts, which ship without
//! embedded metrics. Good enough for centring and right-aligning labels.

const PT_TO_MM: f32 = 25.4 / 72.0;

// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Mono,
    MonoBold,
}

/// Width of `text` set in `face` at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, face: FontFace, size_pt: f32) -> f32 {
    let em: u32 = match face {
        FontFace::Mono | FontFace::MonoBold => 600 * text.chars().count() as u32,
        FontFace::Regular | FontFace::Bold => text.chars().map(helvetica_width).map(u32::from).sum(),
    };
    // Helvetica-Bold runs roughly 6% wider than the regular cut.
    let scale = if face == FontFace::Bold { 1.06 } else { 1.0 };
    em as f32 / 1000.0 * size_pt * scale * PT_TO_MM
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * PT_TO_MM
}

fn helvetica_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA[(code - 32) as usize]
    } else {
        556
    }
}
