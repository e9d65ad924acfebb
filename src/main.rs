// INCLUSIVO - inclusive-language review of PDF documents
use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use inclusivo::config::Config;
use inclusivo::controller::{run_pipeline, Controller, PipelineOutput};
use inclusivo::debug_panel::DebugPanel;
use inclusivo::error::InclusivoError;
use inclusivo::logging::debug_log;
use inclusivo::screen_mode::ScreenMode;
use inclusivo::suggestions::SuggestionService;
use inclusivo::theme::colors;
use inclusivo::types::{AppFlags, ViewState};
use inclusivo::views::comparison::{ClickOutcome, ComparisonView, EditMode};
use inclusivo::views::status_bar::{self, StatusLine};
use inclusivo::views::{home, render_panel_header, Rect};

mod file_picker;
mod keyboard;

// Loop iterations between spinner frames while analysing
const SPINNER_EVERY: usize = 4;

#[derive(Parser, Debug)]
#[command(author, version, about = "Revisa un PDF y propone un lenguaje más inclusivo")]
struct Args {
    /// PDF to analyse right away
    pdf_file: Option<PathBuf>,
    /// Where `inclusivo_<name>.txt` is written
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Analyse PDF_FILE without the terminal UI and print the result
    #[arg(long, requires = "pdf_file")]
    headless: bool,
}

type PipelineResult = inclusivo::Result<PipelineOutput>;

pub struct App {
    pub controller: Controller,
    pub comparison: Option<ComparisonView>,
    pub pending: Option<oneshot::Receiver<PipelineResult>>,
    pub status_message: String,
    pub flags: AppFlags,
    pub open_file_picker: bool,
    pub screen_mode: ScreenMode,
    pub debug_panel: DebugPanel,
    pub last_rendered_screen: Option<ScreenMode>,
    pub tick: usize,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            comparison: None,
            pending: None,
            status_message: String::new(),
            flags: AppFlags::REDRAW,
            open_file_picker: false,
            screen_mode: ScreenMode::Main,
            debug_panel: DebugPanel::new(),
            last_rendered_screen: None,
            tick: 0,
        }
    }

    /// Kick off the pipeline on its own task; the UI keeps running
    pub fn start_analysis(&mut self, path: PathBuf) {
        self.comparison = None;
        self.status_message.clear();
        self.flags.insert(AppFlags::REDRAW);
        if !self.controller.select_file(&path) {
            return;
        }

        let (tx, rx) = oneshot::channel();
        let service = self.controller.service();
        tokio::spawn(async move {
            let _ = tx.send(run_pipeline(service, path).await);
        });
        self.pending = Some(rx);
    }

    /// Apply the pipeline result once it arrives. Returns true when it did.
    pub fn poll_pipeline(&mut self, area: Rect) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err(InclusivoError::PipelineAborted),
        };
        self.pending = None;
        self.controller.finish(result);
        if self.controller.state() == ViewState::Comparing {
            self.comparison = Some(ComparisonView::new(self.controller.session(), area));
        }
        true
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode() == Some(EditMode::Editing)
    }

    pub fn edit_mode(&self) -> Option<EditMode> {
        self.comparison.as_ref().map(|view| view.mode())
    }

    pub fn with_comparison<F: FnOnce(&mut ComparisonView)>(&mut self, f: F) {
        if let Some(view) = self.comparison.as_mut() {
            f(view);
        }
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.comparison = None;
        self.status_message.clear();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Ok(path) = dotenvy::dotenv() {
        debug_log(format!("Loaded environment from {}", path.display()));
    }

    let mut config = Config::from_env(args.config.as_deref())?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    debug_log(format!(
        "🚀 Inclusivo v{} - {} proveedor(es) configurado(s)",
        env!("CARGO_PKG_VERSION"),
        config.configured_providers()
    ));

    let service = Arc::new(SuggestionService::from_config(&config));
    let controller = Controller::new(service, config.output_dir.clone());

    if args.headless {
        let path = args
            .pdf_file
            .ok_or_else(|| anyhow::anyhow!("--headless necesita la ruta de un PDF"))?;
        return run_headless(controller, &path).await;
    }

    let mut app = App::new(controller);
    if let Some(path) = args.pdf_file {
        app.start_analysis(path);
    }

    setup_terminal()?;
    let result = run_app(&mut app).await;
    restore_terminal()?;

    result
}

async fn run_headless(mut controller: Controller, path: &Path) -> Result<()> {
    match controller.process_file(path).await {
        ViewState::Comparing => {
            println!("{}", controller.session().modified_text);
            let saved = controller.download().map_err(|e| anyhow::anyhow!(e.user_message()))?;
            eprintln!("Guardado en {}", saved.display());
            Ok(())
        }
        _ => {
            let message = controller
                .error_message()
                .unwrap_or("Ocurrió un error desconocido.")
                .to_string();
            anyhow::bail!(message)
        }
    }
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    execute!(io::stdout(), Show, LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn body_area(term_width: u16, term_height: u16) -> Rect {
    Rect::new(0, 0, term_width, term_height.saturating_sub(1))
}

async fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    let mut last_term_size = (0, 0);

    loop {
        let (term_width, term_height) = terminal::size()?;
        let body = body_area(term_width, term_height);

        if (term_width, term_height) != last_term_size || app.last_rendered_screen != Some(app.screen_mode) {
            app.flags.insert(AppFlags::REDRAW);
            last_term_size = (term_width, term_height);
            app.last_rendered_screen = Some(app.screen_mode);
        }

        if app.open_file_picker {
            app.open_file_picker = false;
            restore_terminal()?;
            let picked = file_picker::pick_pdf_file();
            setup_terminal()?;
            match picked {
                Ok(Some(path)) => app.start_analysis(path),
                Ok(None) => {}
                Err(e) => {
                    inclusivo::debug_error!("file picker failed: {}", e);
                    app.status_message = "No se pudo abrir el selector de archivos".to_string();
                }
            }
            app.flags.insert(AppFlags::REDRAW);
        }

        if app.poll_pipeline(body) {
            app.flags.insert(AppFlags::REDRAW);
        }

        if app.controller.state() == ViewState::Loading || app.screen_mode == ScreenMode::Debug {
            app.tick += 1;
            if app.tick % SPINNER_EVERY == 0 {
                app.flags.insert(AppFlags::REDRAW);
            }
        }

        if app.flags.contains(AppFlags::REDRAW) {
            render(app, &mut stdout, term_width, term_height)?;
            stdout.flush()?;
            app.flags.remove(AppFlags::REDRAW);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if !keyboard::handle_input(app, key)? || app.flags.contains(AppFlags::EXIT) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(_, _) => app.flags.insert(AppFlags::REDRAW),
                _ => {}
            }
        }
    }

    Ok(())
}

fn render(app: &mut App, stdout: &mut io::Stdout, term_width: u16, term_height: u16) -> Result<()> {
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    let body = body_area(term_width, term_height);

    match app.screen_mode {
        ScreenMode::Debug => {
            render_panel_header(stdout, Rect::new(0, 0, term_width, 1), "DEBUG LOG", colors::HEADER_DEBUG, true)?;
            app.debug_panel.refresh();
            app.debug_panel.render(stdout, body.below_header())?;
        }
        ScreenMode::Main => match app.controller.state() {
            ViewState::Initial => home::render_home(stdout, body, None)?,
            ViewState::Error => home::render_home(stdout, body, app.controller.error_message())?,
            ViewState::Loading => home::render_loading(
                stdout,
                body,
                &app.controller.session().file_name,
                app.tick / SPINNER_EVERY,
            )?,
            ViewState::Comparing => {
                if let Some(view) = app.comparison.as_mut() {
                    view.set_area(body);
                    view.sync(&app.controller.session().modified_text);
                    view.render(stdout)?;
                }
            }
        },
    }

    let session = app.controller.session();
    let status = StatusLine {
        screen_mode: app.screen_mode,
        state: app.controller.state(),
        edit_mode: app.edit_mode(),
        file_name: &session.file_name,
        change_count: session.changes.len(),
        message: &app.status_message,
    };
    status_bar::render(stdout, &status, term_width, term_height)?;
    Ok(())
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.screen_mode == ScreenMode::Debug {
        if app.debug_panel.handle_mouse(mouse) {
            app.flags.insert(AppFlags::REDRAW);
        }
        return;
    }

    match app.controller.state() {
        ViewState::Initial | ViewState::Error => {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                app.open_file_picker = true;
            }
        }
        ViewState::Comparing => {
            let Some(view) = app.comparison.as_mut() else {
                return;
            };
            let changed = match mouse.kind {
                MouseEventKind::Moved => view.hover(mouse.column, mouse.row),
                MouseEventKind::Down(MouseButton::Left) => {
                    view.click(mouse.column, mouse.row) != ClickOutcome::Ignored
                }
                MouseEventKind::ScrollUp => {
                    view.scroll_at(mouse.column, mouse.row, -3);
                    true
                }
                MouseEventKind::ScrollDown => {
                    view.scroll_at(mouse.column, mouse.row, 3);
                    true
                }
                _ => false,
            };
            if changed {
                app.flags.insert(AppFlags::REDRAW);
            }
        }
        ViewState::Loading => {}
    }
}
