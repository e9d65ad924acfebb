// Error types for Inclusivo
use crate::pdf_extraction::ExtractionError;
use crate::suggestions::SuggestionError;

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Por favor, sube un archivo PDF válido.";
pub const FILE_READ_MESSAGE: &str = "Error al leer el archivo.";

#[derive(Debug, thiserror::Error)]
pub enum InclusivoError {
    #[error("not a PDF file: {0}")]
    InvalidFileType(String),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Suggestions(#[from] SuggestionError),

    #[error("there is no analysed document to download")]
    NothingToDownload,

    #[error("analysis task ended without a result")]
    PipelineAborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InclusivoError {
    /// Spanish text shown on the error screen.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFileType(_) => INVALID_FILE_TYPE_MESSAGE.to_string(),
            Self::FileRead { .. } => FILE_READ_MESSAGE.to_string(),
            Self::Extraction(e) => e.user_message().to_string(),
            Self::Suggestions(e) => e.user_message().to_string(),
            Self::NothingToDownload => "No hay ningún documento analizado para descargar.".to_string(),
            Self::PipelineAborted => "El análisis se interrumpió inesperadamente. Por favor, intenta de nuevo.".to_string(),
            Self::Io(e) => format!("Error de escritura: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, InclusivoError>;
