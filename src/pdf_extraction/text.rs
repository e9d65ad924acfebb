// Plain text extraction - pages in order, text runs joined by spaces
use std::time::Instant;

use super::lopdf_helper::with_pdf;
use super::ExtractionError;
use crate::{debug_error, debug_timing};
use crate::logging::debug_log;

/// Extract the embedded text of every page, in page order.
///
/// Each page's text runs are joined by single spaces, every page is followed
/// by a blank line, and the result is trimmed. Image-only pages contribute
/// nothing; there is no OCR.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = extract_pages(bytes)?;
    Ok(assemble_pages(&pages))
}

/// Per-page text, one entry per page in page-number order.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    with_pdf(bytes, |document| {
        let pages = document.get_pages();
        debug_log(format!("📄 Extracting text from {} pages", pages.len()));

        let mut texts = Vec::with_capacity(pages.len());
        // BTreeMap keys are page numbers, so iteration is already in order
        for page_number in pages.keys() {
            let raw = document.extract_text(&[*page_number]).map_err(|e| {
                debug_error!("Page {} failed: {}", page_number, e);
                ExtractionError::Corrupt(format!("page {}: {}", page_number, e))
            })?;
            texts.push(join_text_runs(&raw));
        }
        Ok(texts)
    })
}

pub fn page_count(bytes: &[u8]) -> Result<usize, ExtractionError> {
    with_pdf(bytes, |document| Ok(document.get_pages().len()))
}

/// Extract on a blocking thread so the UI loop keeps drawing.
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Result<String, ExtractionError> {
    let start = Instant::now();
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractionError::Unknown(e.to_string()))??;
    debug_timing!("Text extraction", start);
    Ok(text)
}

/// Join pages with a blank line after each page, then trim.
pub fn assemble_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut full_text = String::new();
    for page in pages {
        full_text.push_str(page.as_ref());
        full_text.push_str("\n\n");
    }
    full_text.trim().to_string()
}

// lopdf ends every text object with a newline; those are the text runs
fn join_text_runs(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join(" ")
}
