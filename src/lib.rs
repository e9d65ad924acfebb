// Inclusivo - inclusive-language review of PDF documents in the terminal
pub mod config;
pub mod controller;
pub mod debug_panel;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod pdf_extraction;
pub mod reconcile;
pub mod screen_mode;
pub mod suggestions;
pub mod theme;
pub mod types;
pub mod views;

pub use config::Config;
pub use controller::{run_pipeline, Controller, PipelineOutput};
pub use error::{InclusivoError, Result};
pub use types::{Change, DocumentSession, Suggestion, ViewState};
