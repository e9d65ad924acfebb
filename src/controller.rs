// Application controller: owns the session and the view state
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{InclusivoError, Result};
use crate::logging::debug_log;
use crate::pdf_extraction::extract_text_blocking;
use crate::reconcile::{apply_changes, assign_ids};
use crate::suggestions::SuggestionService;
use crate::types::{Change, DocumentSession, ViewState};
use crate::{debug_error, debug_timing};

const PDF_MIME: &str = "application/pdf";

/// What a successful analysis produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub original_text: String,
    pub modified_text: String,
    pub changes: Vec<Change>,
}

/// Read, extract, ask for suggestions, reconcile.
///
/// Owns everything it needs so it can run on its own task while the UI keeps
/// drawing the loading screen.
pub async fn run_pipeline(service: Arc<SuggestionService>, path: PathBuf) -> Result<PipelineOutput> {
    let start = Instant::now();
    debug_log(format!("=== Analysing {} ===", path.display()));

    let bytes = tokio::fs::read(&path).await.map_err(|source| InclusivoError::FileRead {
        path: path.display().to_string(),
        source,
    })?;

    let original_text = extract_text_blocking(bytes).await?;
    debug_log(format!("Extracted {} characters", original_text.chars().count()));

    let suggestions = service.suggest(&original_text).await?;
    let changes = assign_ids(suggestions);
    let modified_text = apply_changes(&original_text, &changes);

    debug_timing!("Pipeline", start);
    Ok(PipelineOutput {
        original_text,
        modified_text,
        changes,
    })
}

pub fn is_pdf(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.essence_str() == PDF_MIME)
}

/// `inclusivo_<base name>.txt` for the uploaded file name
pub fn download_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("documento");
    format!("inclusivo_{}.txt", base)
}

pub struct Controller {
    service: Arc<SuggestionService>,
    output_dir: PathBuf,
    state: ViewState,
    session: DocumentSession,
    error: Option<String>,
}

impl Controller {
    pub fn new(service: Arc<SuggestionService>, output_dir: PathBuf) -> Self {
        Self {
            service,
            output_dir,
            state: ViewState::Initial,
            session: DocumentSession::default(),
            error: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn service(&self) -> Arc<SuggestionService> {
        Arc::clone(&self.service)
    }

    /// Start an analysis of `path`.
    ///
    /// Non-PDF files go straight to `Error` without touching the network.
    /// Returns true when the pipeline should now run.
    pub fn select_file(&mut self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_pdf(path) {
            debug_error!("Rejected non-PDF file {}", file_name);
            self.fail(InclusivoError::InvalidFileType(file_name));
            return false;
        }

        debug_log(format!("📂 Selected {}", file_name));
        self.session = DocumentSession {
            file_name,
            ..DocumentSession::default()
        };
        self.error = None;
        self.state = ViewState::Loading;
        true
    }

    /// Apply the outcome of [`run_pipeline`]
    pub fn finish(&mut self, result: Result<PipelineOutput>) {
        if self.state != ViewState::Loading {
            debug_log("Ignoring pipeline result that arrived outside Loading");
            return;
        }
        match result {
            Ok(output) => {
                debug_log(format!("✅ {} changes applied", output.changes.len()));
                self.session.original_text = output.original_text;
                self.session.modified_text = output.modified_text;
                self.session.changes = output.changes;
                self.state = ViewState::Comparing;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Select and analyse in one go, for callers that can simply wait.
    pub async fn process_file(&mut self, path: &Path) -> ViewState {
        if self.select_file(path) {
            let result = run_pipeline(self.service(), path.to_path_buf()).await;
            self.finish(result);
        }
        self.state
    }

    pub fn update_modified_text(&mut self, text: String) {
        if self.state == ViewState::Comparing {
            self.session.modified_text = text;
        }
    }

    /// Write the current modified text next to the other downloads.
    pub fn download(&self) -> Result<PathBuf> {
        if self.state != ViewState::Comparing {
            return Err(InclusivoError::NothingToDownload);
        }
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(download_file_name(&self.session.file_name));
        std::fs::write(&path, self.session.modified_text.as_bytes())?;
        debug_log(format!("💾 Saved {}", path.display()));
        Ok(path)
    }

    pub fn reset(&mut self) {
        debug_log("Session reset");
        self.session = DocumentSession::default();
        self.error = None;
        self.state = ViewState::Initial;
    }

    // Any failure discards the in-progress session
    fn fail(&mut self, error: InclusivoError) {
        debug_error!("{}", error);
        self.session = DocumentSession::default();
        self.error = Some(error.user_message());
        self.state = ViewState::Error;
    }
}
