use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Report styling configuration, stored in the user config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportStyles {
    /// Font for body text in DOCX exports (e.g. "Calibri", "Times New Roman").
    pub body_font: String,

    /// Body text font size in points.
    pub body_size: f32,

    /// Title font size in points.
    pub title_size: f32,

    /// Section heading font size in points.
    pub heading_size: f32,

    /// Font size of the per-item response grid.
    pub response_grid_size: f32,

    /// Page margin in millimetres (applied uniformly).
    pub margin_mm: f32,

    /// Table headers and normal bars.
    pub accent_color: String,

    /// Bars whose mean reaches the clinical cutoff.
    pub highlight_color: String,

    /// Dashed cutoff line and "Clinical" markers.
    pub alert_color: String,

    /// Background of the dimension table body.
    pub table_body_color: String,

    /// Append the Likert response distribution chart.
    pub include_histogram: bool,
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            body_size: 10.0,
            title_size: 18.0,
            heading_size: 13.0,
            response_grid_size: 8.5,
            margin_mm: 20.0,
            accent_color: "#0078d4".to_string(),
            highlight_color: "#fc988d".to_string(),
            alert_color: "#fc1900".to_string(),
            table_body_color: "#fff8f0".to_string(),
            include_histogram: false,
        }
    }
}

/// An sRGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::from_u8(0x1a, 0x1a, 0x1a);
    pub const WHITE: Rgb = Rgb::from_u8(0xff, 0xff, 0xff);
    pub const GREY: Rgb = Rgb::from_u8(0x80, 0x80, 0x80);
    pub const GRID: Rgb = Rgb::from_u8(0xe0, 0xe0, 0xe0);

    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. The alpha channel is ignored.
    pub fn parse_hex(input: &str) -> Result<Self, ExportError> {
        let invalid = || ExportError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::from_u8(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// The parsed colours of a [`ReportStyles`].
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Rgb,
    pub highlight: Rgb,
    pub alert: Rgb,
    pub table_body: Rgb,
}

impl Palette {
    pub fn from_styles(styles: &ReportStyles) -> Result<Self, ExportError> {
        Ok(Self {
            accent: Rgb::parse_hex(&styles.accent_color)?,
            highlight: Rgb::parse_hex(&styles.highlight_color)?,
            alert: Rgb::parse_hex(&styles.alert_color)?,
            table_body: Rgb::parse_hex(&styles.table_body_color)?,
        })
    }
}
