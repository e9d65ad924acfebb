// Upload, loading and error screens
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

use crate::theme::InclusivoTheme;
use crate::views::{render_panel_header, Rect};

pub const TITLE: &str = "Agente IA Inclusivo PDF";
pub const DESCRIPTION: &str = "Sube un documento PDF y nuestro agente de IA analizará su contenido \
para sugerir un lenguaje más inclusivo, respetuoso y no discriminatorio.";
pub const UPLOAD_HINT: &str = "Subir PDF  (Ctrl+O)";
pub const ERROR_HEADING: &str = "Ocurrió un error:";
pub const LOADING_MESSAGE: &str = "Analizando tu documento...";
pub const LOADING_DETAIL: &str = "Esto puede tardar unos segundos.";

const SPINNER: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Break `text` into lines of at most `width` chars, on spaces where possible
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if !current.is_empty() && current.chars().count() + needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        while current.chars().count() > width {
            let head: String = current.chars().take(width).collect();
            current = current.chars().skip(width).collect();
            lines.push(head);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn centered<W: Write>(out: &mut W, area: Rect, row: u16, text: &str) -> io::Result<()> {
    let len = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(len) / 2;
    execute!(out, MoveTo(x, row), Print(text))
}

/// Initial screen; `error` adds the error box underneath
pub fn render_home<W: Write>(out: &mut W, area: Rect, error: Option<&str>) -> io::Result<()> {
    render_panel_header(out, Rect::new(area.x, area.y, area.width, 1), TITLE, InclusivoTheme::accent_open_file(), true)?;

    let text_width = (area.width as usize).saturating_sub(8).min(72);
    let mut row = area.y + 3;

    execute!(out, SetForegroundColor(InclusivoTheme::text_secondary()))?;
    for line in wrap_words(DESCRIPTION, text_width) {
        centered(out, area, row, &line)?;
        row += 1;
    }
    execute!(out, ResetColor)?;

    row += 2;
    execute!(
        out,
        SetForegroundColor(InclusivoTheme::accent_text()),
        SetAttribute(Attribute::Bold)
    )?;
    centered(out, area, row, &format!("[ {} ]", UPLOAD_HINT))?;
    execute!(out, SetAttribute(Attribute::Reset), ResetColor)?;

    if let Some(message) = error {
        row += 3;
        execute!(
            out,
            SetForegroundColor(InclusivoTheme::error()),
            SetAttribute(Attribute::Bold)
        )?;
        centered(out, area, row, ERROR_HEADING)?;
        execute!(out, SetAttribute(Attribute::Reset), SetForegroundColor(InclusivoTheme::error()))?;
        for line in wrap_words(message, text_width) {
            row += 1;
            centered(out, area, row, &line)?;
        }
        execute!(out, ResetColor)?;
    }
    Ok(())
}

pub fn render_loading<W: Write>(out: &mut W, area: Rect, file_name: &str, tick: usize) -> io::Result<()> {
    render_panel_header(out, Rect::new(area.x, area.y, area.width, 1), TITLE, InclusivoTheme::accent_open_file(), true)?;

    let middle = area.y + area.height / 2;
    let spinner = SPINNER[tick % SPINNER.len()];
    execute!(out, SetForegroundColor(InclusivoTheme::success()))?;
    centered(out, area, middle.saturating_sub(1), &format!("{} {}", spinner, LOADING_MESSAGE))?;
    execute!(out, SetForegroundColor(InclusivoTheme::text_dim()))?;
    centered(out, area, middle + 1, file_name)?;
    centered(out, area, middle + 2, LOADING_DETAIL)?;
    execute!(out, ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_wrap_within_width() {
        let lines = wrap_words("uno dos tres cuatro", 8);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 8));
    }

    #[test]
    fn overlong_words_are_split() {
        assert_eq!(wrap_words("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn error_box_shows_message() {
        let mut out = Vec::new();
        render_home(&mut out, Rect::new(0, 0, 100, 30), Some("Por favor, sube un archivo PDF válido.")).unwrap();
        let screen = String::from_utf8_lossy(&out);
        assert!(screen.contains(ERROR_HEADING));
        assert!(screen.contains("Por favor, sube un archivo PDF válido."));
    }

    #[test]
    fn loading_screen_names_the_file() {
        let mut out = Vec::new();
        render_loading(&mut out, Rect::new(0, 0, 80, 24), "informe.pdf", 3).unwrap();
        let screen = String::from_utf8_lossy(&out);
        assert!(screen.contains(LOADING_MESSAGE));
        assert!(screen.contains("informe.pdf"));
    }
}
