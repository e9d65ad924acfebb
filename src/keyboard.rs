// Keyboard handling module
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use inclusivo::logging::debug_log;
use inclusivo::screen_mode::ScreenMode;
use inclusivo::types::{AppFlags, ViewState};

use crate::App;

fn is_open_shortcut(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('o') && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Returns false when the application should exit
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl+C - Exit from anywhere, even mid-edit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.flags.insert(AppFlags::EXIT);
        return Ok(false);
    }

    // While editing every other key belongs to the text area
    if app.screen_mode == ScreenMode::Main && app.is_editing() {
        handle_editing_keys(app, key);
        return Ok(true);
    }

    if is_open_shortcut(&key) {
        if app.controller.state() == ViewState::Loading {
            app.status_message = "Espera a que termine el análisis".to_string();
        } else {
            app.open_file_picker = true;
            debug_log("Global Ctrl+O: Opening file picker");
        }
        app.flags.insert(AppFlags::REDRAW);
        return Ok(true);
    }

    if key.code == KeyCode::Tab {
        app.screen_mode = app.screen_mode.toggle();
        app.flags.insert(AppFlags::REDRAW);
        debug_log(format!("Switched to {:?} screen", app.screen_mode));
        return Ok(true);
    }

    match app.screen_mode {
        ScreenMode::Debug => handle_debug_keys(app, key),
        ScreenMode::Main => handle_main_keys(app, key),
    }
    Ok(true)
}

fn handle_debug_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.debug_panel.scroll_up(1),
        KeyCode::Down => app.debug_panel.scroll_down(1),
        KeyCode::PageUp => app.debug_panel.scroll_up(10),
        KeyCode::PageDown => app.debug_panel.scroll_down(10),
        _ => return,
    }
    app.flags.insert(AppFlags::REDRAW);
}

fn handle_main_keys(app: &mut App, key: KeyEvent) {
    match (app.controller.state(), key.code) {
        (ViewState::Comparing, KeyCode::Char('n')) => app.with_comparison(|view| view.cycle(true)),
        (ViewState::Comparing, KeyCode::Char('p')) => app.with_comparison(|view| view.cycle(false)),
        (ViewState::Comparing, KeyCode::Char('e')) => app.with_comparison(|view| view.start_editing()),
        (ViewState::Comparing, KeyCode::Char('d')) => {
            app.status_message = match app.controller.download() {
                Ok(path) => format!("Guardado en {}", path.display()),
                Err(e) => e.user_message(),
            };
        }
        (ViewState::Comparing | ViewState::Error, KeyCode::Char('r')) => app.reset(),
        _ => return,
    }
    app.flags.insert(AppFlags::REDRAW);
}

fn handle_editing_keys(app: &mut App, key: KeyEvent) {
    let Some(view) = app.comparison.as_mut() else {
        return;
    };
    if key.code == KeyCode::Esc {
        view.stop_editing();
    } else if let Some(text) = view.edit_key(key) {
        app.controller.update_modified_text(text);
    }
    app.flags.insert(AppFlags::REDRAW);
}
