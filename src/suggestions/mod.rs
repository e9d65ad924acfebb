//! Suggestion providers
//!
//! Inclusive-language suggestions come from remote LLM services. Two are
//! supported and tried strictly in order:
//! - Gemini (primary)
//! - Groq (secondary)
//!
//! A provider missing from the configuration is skipped, not counted as a
//! failure. Each configured provider gets exactly one attempt.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inclusivo::config::Config;
//! use inclusivo::suggestions::SuggestionService;
//!
//! let service = SuggestionService::from_config(&Config::from_env(None)?);
//! let suggestions = service.suggest("El ingeniero debe revisar el código.").await?;
//! ```

mod gemini;
mod groq;
mod parse;
mod prompt;
mod provider;
mod service;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use parse::{parse_suggestions, parse_suggestions_lenient};
pub use prompt::build_prompt;
pub use provider::SuggestionProvider;
pub use service::{ProviderSlot, SuggestionService};

/// Fixed text shown when every provider failed, whatever their individual errors.
pub const PROVIDERS_UNAVAILABLE_MESSAGE: &str =
    "Las APIs de IA están temporalmente no disponibles. Por favor, intenta de nuevo en unos minutos.";

/// Failure of a single provider call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("API Error: {status}: {body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    InvalidResponse(String),

    #[error("No se recibió respuesta de {0}")]
    EmptyResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionError {
    /// Every configured provider failed, or none was configured.
    #[error("all suggestion providers failed: [{}]", errors.join("; "))]
    AggregatedFailure { errors: Vec<String> },
}

impl SuggestionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AggregatedFailure { .. } => PROVIDERS_UNAVAILABLE_MESSAGE,
        }
    }
}
