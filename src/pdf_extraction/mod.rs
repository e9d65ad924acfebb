// PDF extraction module
pub mod lopdf_helper;
pub mod text;

pub use text::{assemble_pages, extract_pages, extract_text, extract_text_blocking, page_count};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("PDF is corrupt or in an unsupported format: {0}")]
    Corrupt(String),

    #[error("unknown PDF error: {0}")]
    Unknown(String),
}

impl ExtractionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PasswordProtected => {
                "El PDF está protegido con contraseña. Por favor, proporciona un archivo diferente."
            }
            Self::Corrupt(_) => {
                "Error al procesar el archivo PDF. Podría estar corrupto o en un formato no compatible."
            }
            Self::Unknown(_) => "Ocurrió un error desconocido al procesar el PDF.",
        }
    }
}
