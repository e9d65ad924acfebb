use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use nucleo::{Config, Nucleo, Utf32String};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use inclusivo::logging::debug_log;
use inclusivo::theme::InclusivoTheme;

// Header (2 lines), blank, search (2 lines), then matches
const LIST_TOP: u16 = 6;

/// Use nucleo to pick a PDF file with interactive fuzzy finding
pub fn pick_pdf_file() -> Result<Option<PathBuf>> {
    let pdf_files = find_pdf_files(&search_dirs());
    debug_log(format!("File picker found {} PDFs", pdf_files.len()));

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    execute!(stdout, crossterm::event::EnableMouseCapture)?;

    let result = run_fuzzy_picker(&pdf_files);

    execute!(stdout, crossterm::event::DisableMouseCapture)?;
    terminal::disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

/// Documents, Desktop, Downloads and the working directory, in that order
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs_list: Vec<PathBuf> = [dirs::document_dir(), dirs::desktop_dir(), dirs::download_dir()]
        .into_iter()
        .flatten()
        .filter(|d| d.is_dir())
        .collect();
    dirs_list.push(PathBuf::from("."));
    dirs_list
}

/// Shorten paths under the home directory to `~/...`
pub fn display_path(path: &str, home: Option<&Path>) -> String {
    if let Some(home) = home.and_then(|h| h.to_str()) {
        if let Some(rest) = path.strip_prefix(home) {
            return format!("~{}", rest);
        }
    }
    path.strip_prefix("./").unwrap_or(path).to_string()
}

/// Fit a path into `max_width` chars, falling back to `.../file name`
pub fn fit_to_width(path: &str, max_width: usize) -> String {
    if path.chars().count() <= max_width {
        return path.to_string();
    }
    let filename = path.rsplit('/').next().unwrap_or(path);
    if filename.chars().count() + 4 <= max_width {
        format!(".../{}", filename)
    } else {
        let keep = max_width.saturating_sub(3);
        format!("{}...", filename.chars().take(keep).collect::<String>())
    }
}

fn run_fuzzy_picker(files: &[String]) -> Result<Option<PathBuf>> {
    let mut stdout = io::stdout();
    let home = dirs::home_dir();

    let mut nucleo = Nucleo::<Arc<str>>::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

    let injector = nucleo.injector();
    for file in files {
        let file_arc: Arc<str> = Arc::from(file.as_str());
        let _ = injector.push(file_arc, |data, cols: &mut [Utf32String]| {
            cols[0] = data.as_ref().into();
        });
    }

    let mut query = String::new();
    let mut selected_index = 0usize;
    let mut scroll_offset = 0usize;

    loop {
        nucleo.tick(10);
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        let (term_width, term_height) = terminal::size().unwrap_or((80, 24));

        execute!(
            stdout,
            MoveTo(0, 0),
            SetBackgroundColor(InclusivoTheme::accent_open_file()),
            SetForegroundColor(InclusivoTheme::text_header()),
            SetAttribute(Attribute::Bold),
            Print(format!(
                "  {:<width$}",
                "Inclusivo - Selecciona un PDF",
                width = term_width.saturating_sub(2) as usize
            )),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )?;
        execute!(
            stdout,
            MoveTo(0, 1),
            SetBackgroundColor(InclusivoTheme::accent_open_file()),
            Print(" ".repeat(term_width as usize)),
            ResetColor
        )?;

        execute!(
            stdout,
            MoveTo(0, 3),
            SetForegroundColor(InclusivoTheme::accent_text()),
            Print("  🔍 Buscar: "),
            SetForegroundColor(InclusivoTheme::text_primary()),
            Print(&query),
            SetForegroundColor(InclusivoTheme::text_dim()),
            Print("_"),
            ResetColor
        )?;

        let snapshot = nucleo.snapshot();
        let all_matches = snapshot.matched_items(..).collect::<Vec<_>>();

        let max_path_width = (term_width as usize).saturating_sub(5);
        let max_display_items = (term_height as usize).saturating_sub(9).clamp(1, 15);

        if selected_index >= scroll_offset + max_display_items {
            scroll_offset = selected_index + 1 - max_display_items;
        } else if selected_index < scroll_offset {
            scroll_offset = selected_index;
        }

        let visible_matches = all_matches
            .iter()
            .skip(scroll_offset)
            .take(max_display_items)
            .collect::<Vec<_>>();

        if files.is_empty() {
            execute!(
                stdout,
                MoveTo(0, LIST_TOP),
                SetForegroundColor(InclusivoTheme::text_dim()),
                Print("  No se encontraron archivos PDF"),
                ResetColor
            )?;
        }

        for (display_i, item) in visible_matches.iter().enumerate() {
            let actual_index = scroll_offset + display_i;
            let shown = fit_to_width(&display_path(item.data.as_ref(), home.as_deref()), max_path_width);
            execute!(
                stdout,
                MoveTo(0, LIST_TOP + display_i as u16),
                Clear(ClearType::CurrentLine)
            )?;

            if actual_index == selected_index {
                execute!(
                    stdout,
                    SetForegroundColor(InclusivoTheme::success()),
                    Print("  ▶ "),
                    SetForegroundColor(InclusivoTheme::text_primary()),
                    Print(&shown),
                    ResetColor
                )?;
            } else {
                execute!(
                    stdout,
                    Print("    "),
                    SetForegroundColor(InclusivoTheme::text_secondary()),
                    Print(&shown),
                    ResetColor
                )?;
            }
        }

        let help_line = LIST_TOP + max_display_items as u16 + 2;
        let scroll_indicator = if all_matches.len() > max_display_items {
            format!(
                "  {}-{} de {} archivos",
                scroll_offset + 1,
                (scroll_offset + visible_matches.len()).min(all_matches.len()),
                all_matches.len()
            )
        } else {
            format!("  {} archivos", all_matches.len())
        };

        execute!(
            stdout,
            MoveTo(0, help_line),
            SetForegroundColor(InclusivoTheme::text_dim()),
            Print(&scroll_indicator),
            MoveTo(0, help_line + 1),
            Print("  ↑/↓ Navegar  •  Enter Seleccionar  •  Esc Volver  •  Escribe para buscar"),
            ResetColor
        )?;

        stdout.flush()?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
                    return Ok(None);
                }
            }
            Event::Key(key) => match key.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Enter => {
                    if let Some(item) = all_matches.get(selected_index) {
                        return Ok(Some(PathBuf::from(item.data.as_ref())));
                    }
                }
                KeyCode::Up => selected_index = selected_index.saturating_sub(1),
                KeyCode::Down => {
                    selected_index = (selected_index + 1).min(all_matches.len().saturating_sub(1));
                }
                KeyCode::PageUp => selected_index = selected_index.saturating_sub(max_display_items),
                KeyCode::PageDown => {
                    selected_index = (selected_index + max_display_items).min(all_matches.len().saturating_sub(1));
                }
                KeyCode::Home => selected_index = 0,
                KeyCode::End => selected_index = all_matches.len().saturating_sub(1),
                KeyCode::Backspace | KeyCode::Char(_) => {
                    let appending = matches!(key.code, KeyCode::Char(_));
                    match key.code {
                        KeyCode::Char(c) => query.push(c),
                        _ => {
                            query.pop();
                        }
                    }
                    selected_index = 0;
                    scroll_offset = 0;
                    nucleo.pattern.reparse(
                        0,
                        &query,
                        nucleo::pattern::CaseMatching::Smart,
                        nucleo::pattern::Normalization::Smart,
                        appending,
                    );
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => selected_index = selected_index.saturating_sub(3),
                MouseEventKind::ScrollDown => {
                    selected_index = (selected_index + 3).min(all_matches.len().saturating_sub(1));
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    let row = mouse.row;
                    if row >= LIST_TOP && row < LIST_TOP + max_display_items as u16 {
                        let clicked = scroll_offset + (row - LIST_TOP) as usize;
                        if clicked < all_matches.len() {
                            selected_index = clicked;
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

/// Every `*.pdf` under `search_dirs`, sorted and deduplicated
pub fn find_pdf_files(search_dirs: &[PathBuf]) -> Vec<String> {
    let mut all_files: Vec<String> = search_dirs.iter().flat_map(|dir| find_pdfs_in_dir(dir)).collect();
    all_files.sort();
    all_files.dedup();
    all_files
}

fn find_pdfs_in_dir(search_dir: &Path) -> Vec<String> {
    let dir = search_dir.to_string_lossy();
    // fd is faster when present; find is the fallback
    let output = if command_exists("fd") {
        Command::new("fd")
            .args(["-e", "pdf", "-t", "f", "-a", ".", dir.as_ref()])
            .output()
    } else {
        Command::new("find")
            .args([dir.as_ref(), "-iname", "*.pdf", "-type", "f"])
            .output()
    };

    match output {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Ok(_) | Err(_) => Vec::new(),
    }
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_prefix_becomes_tilde() {
        let home = PathBuf::from("/home/ana");
        assert_eq!(display_path("/home/ana/Documentos/acta.pdf", Some(&home)), "~/Documentos/acta.pdf");
        assert_eq!(display_path("./informe.pdf", Some(&home)), "informe.pdf");
        assert_eq!(display_path("/srv/informe.pdf", None), "/srv/informe.pdf");
    }

    #[test]
    fn long_paths_fall_back_to_file_name() {
        assert_eq!(fit_to_width("~/a/b/c/informe.pdf", 40), "~/a/b/c/informe.pdf");
        assert_eq!(fit_to_width("~/muy/largo/directorio/informe.pdf", 20), ".../informe.pdf");
        assert_eq!(fit_to_width("~/x/informe_anual_definitivo.pdf", 10), "informe...");
    }

    #[test]
    fn finds_only_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("uno.pdf"), b"%PDF-1.5").unwrap();
        std::fs::write(dir.path().join("dos.docx"), b"PK").unwrap();
        let files = find_pdf_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("uno.pdf"));
    }
}
