//! Colour constants for the terminal form

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const LABEL: Color = Color::Indexed(250);
pub const DIVIDER: Color = Color::Indexed(238);

// Item values, matching the report: 0 grey, 3-4 red
pub const VALUE_ZERO: Color = Color::DarkGray;
pub const VALUE_HIGH: Color = Color::Red;
pub const VALUE_EMPTY: Color = Color::Indexed(240);

pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY: Color = Color::Cyan;
pub const FLASH_INFO: Color = Color::Green;
pub const FLASH_WARNING: Color = Color::Yellow;
pub const FLASH_ERROR: Color = Color::Red;

pub fn focused() -> Style {
    Style::new().reversed()
}

pub fn value_style(value: &str) -> Style {
    match value {
        "" => Style::new().fg(VALUE_EMPTY),
        "0" => Style::new().fg(VALUE_ZERO),
        "3" | "4" => Style::new().fg(VALUE_HIGH).bold(),
        _ => Style::new(),
    }
}
