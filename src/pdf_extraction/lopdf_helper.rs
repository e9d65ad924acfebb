// lopdf helper - Pure Rust PDF loading
use lopdf::Document;

use super::ExtractionError;

/// Load a PDF document from memory, opening encrypted files with the empty user password
pub fn load_pdf(bytes: &[u8]) -> Result<Document, ExtractionError> {
    let mut document = Document::load_mem(bytes).map_err(|e| {
        let message = e.to_string();
        if mentions_encryption(&message) {
            ExtractionError::PasswordProtected
        } else {
            ExtractionError::Corrupt(message)
        }
    })?;

    if document.is_encrypted() {
        // Owner-password-only files open with an empty user password
        document
            .decrypt("")
            .map_err(|_| ExtractionError::PasswordProtected)?;
    }

    Ok(document)
}

/// Execute an operation with a loaded PDF document
pub fn with_pdf<F, R>(bytes: &[u8], f: F) -> Result<R, ExtractionError>
where
    F: FnOnce(&Document) -> Result<R, ExtractionError>,
{
    let document = load_pdf(bytes)?;
    f(&document)
}

fn mentions_encryption(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["encrypt", "decrypt", "password"]
        .iter()
        .any(|needle| lower.contains(needle))
}
