// Status bar rendering
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::screen_mode::ScreenMode;
use crate::theme::InclusivoTheme;
use crate::types::ViewState;
use crate::views::comparison::EditMode;

pub struct StatusLine<'a> {
    pub screen_mode: ScreenMode,
    pub state: ViewState,
    pub edit_mode: Option<EditMode>,
    pub file_name: &'a str,
    pub change_count: usize,
    pub message: &'a str,
}

/// Key hints for what the user can do right now
pub fn hints(screen_mode: ScreenMode, state: ViewState, edit_mode: Option<EditMode>) -> &'static str {
    if screen_mode == ScreenMode::Debug {
        return "↑/↓ Scroll | Tab: Volver | Ctrl+C: Salir";
    }
    match (state, edit_mode) {
        (ViewState::Comparing, Some(EditMode::Editing)) => "Esc: Terminar edición | Ctrl+C: Salir",
        (ViewState::Comparing, _) => {
            "n/p: Cambio | e: Editar | d: Descargar | r: Nuevo | Ctrl+O: Abrir | Tab: Debug | Ctrl+C: Salir"
        }
        (ViewState::Loading, _) => "Tab: Debug | Ctrl+C: Salir",
        (ViewState::Error, _) => "Ctrl+O: Abrir | r: Volver | Tab: Debug | Ctrl+C: Salir",
        (ViewState::Initial, _) => "Ctrl+O: Abrir PDF | Tab: Debug | Ctrl+C: Salir",
    }
}

pub fn format_status(line: &StatusLine<'_>) -> String {
    let screen_name = match line.screen_mode {
        ScreenMode::Main => line.state.label(),
        ScreenMode::Debug => line.screen_mode.label(),
    };
    let mut status = format!(" {}", screen_name);
    if !line.file_name.is_empty() {
        status.push_str(&format!(" | {}", line.file_name));
    }
    if line.state == ViewState::Comparing {
        status.push_str(&format!(" | {} cambios", line.change_count));
    }
    status.push_str(&format!(
        " | {} | {} ",
        if line.message.is_empty() { "Listo" } else { line.message },
        hints(line.screen_mode, line.state, line.edit_mode)
    ));
    status
}

pub fn render<W: Write>(out: &mut W, line: &StatusLine<'_>, width: u16, height: u16) -> io::Result<()> {
    execute!(out, MoveTo(0, height.saturating_sub(1)))?;
    execute!(out, SetBackgroundColor(InclusivoTheme::bg_status()))?;
    execute!(out, SetForegroundColor(InclusivoTheme::text_status()))?;

    let status: String = format_status(line).chars().take(width as usize).collect();
    let status_len = status.chars().count();
    execute!(out, Print(status))?;
    execute!(out, Print(" ".repeat((width as usize).saturating_sub(status_len))))?;
    execute!(out, ResetColor)?;

    Ok(())
}
