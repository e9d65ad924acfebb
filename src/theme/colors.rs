// Theme constants for Inclusivo
use crossterm::style::Color;

pub const BG_STATUS: Color = Color::Rgb { r: 40, g: 40, b: 46 };
pub const FG_STATUS: Color = Color::Rgb { r: 200, g: 200, b: 200 };

// Panel header colors
pub const HEADER_ORIGINAL: Color = Color::Rgb { r: 219, g: 112, b: 147 }; // Soft pink
pub const HEADER_INCLUSIVE: Color = Color::Rgb { r: 176, g: 196, b: 222 }; // Light steel blue
pub const HEADER_DEBUG: Color = Color::Rgb { r: 152, g: 195, b: 121 }; // Soft green
pub const HEADER_EDITING: Color = Color::Rgb { r: 100, g: 149, b: 237 }; // Cornflower blue

// Change highlights: dim amber for every change, bright yellow for the active one
pub const CHANGE_BG: Color = Color::Rgb { r: 110, g: 90, b: 20 };
pub const CHANGE_FG: Color = Color::Rgb { r: 254, g: 240, b: 138 };
pub const ACTIVE_BG: Color = Color::Rgb { r: 253, g: 224, b: 71 };
pub const ACTIVE_FG: Color = Color::Black;

pub const CURSOR_BG: Color = Color::Rgb { r: 176, g: 196, b: 222 };
pub const CURSOR_FG: Color = Color::Black;

pub const ERROR: Color = Color::Rgb { r: 255, g: 85, b: 85 };
