// Theme module - color scheme and styling
use crossterm::style::Color;

pub mod colors;

pub struct InclusivoTheme;

impl InclusivoTheme {
    pub fn bg_status() -> Color {
        colors::BG_STATUS
    }

    pub fn text_status() -> Color {
        colors::FG_STATUS
    }

    pub fn text_primary() -> Color {
        Color::Rgb { r: 248, g: 248, b: 242 }
    }

    pub fn text_secondary() -> Color {
        Color::Rgb { r: 180, g: 180, b: 180 }
    }

    pub fn text_dim() -> Color {
        Color::Rgb { r: 120, g: 120, b: 120 }
    }

    pub fn text_header() -> Color {
        Color::Black
    }

    pub fn accent_open_file() -> Color {
        colors::HEADER_ORIGINAL // Soft pink
    }

    pub fn accent_text() -> Color {
        colors::HEADER_INCLUSIVE // Light steel blue
    }

    pub fn success() -> Color {
        colors::HEADER_DEBUG // Soft green
    }

    pub fn error() -> Color {
        colors::ERROR
    }
}
