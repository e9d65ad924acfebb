// Terminal views
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

pub mod comparison;
pub mod home;
pub mod status_bar;
pub mod text_editor;

/// Screen area in terminal cells
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// Everything below the first row
    pub fn below_header(&self) -> Rect {
        Rect::new(self.x, self.y.saturating_add(1), self.width, self.height.saturating_sub(1))
    }
}

pub fn render_panel_header<W: Write>(
    out: &mut W,
    area: Rect,
    title: &str,
    color: Color,
    is_active: bool,
) -> io::Result<()> {
    execute!(
        out,
        MoveTo(area.x, area.y),
        SetBackgroundColor(color),
        SetForegroundColor(Color::Black),
        SetAttribute(Attribute::Bold)
    )?;
    let indicator = if is_active { "●" } else { "○" };
    let header_text = format!(" {} {} ", indicator, title);
    let header_text: String = header_text.chars().take(area.width as usize).collect();
    write!(out, "{:^width$}", header_text, width = area.width as usize)?;
    execute!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

/// What a char occupies on screen: tabs and carriage returns are one blank cell
pub fn cell_char(c: char) -> char {
    match c {
        '\t' | '\r' => ' ',
        c => c,
    }
}
