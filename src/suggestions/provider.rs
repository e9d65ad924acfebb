//! Suggestion provider trait

use async_trait::async_trait;

use super::ProviderError;
use crate::types::Suggestion;

/// A remote service that proposes inclusive rewrites for a document
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Display name used in logs and aggregated errors
    fn name(&self) -> &'static str;

    /// Ask for rewrites of `text`. Returns already-validated suggestions.
    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, ProviderError>;
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub name: &'static str,
    pub response: Result<Vec<Suggestion>, ProviderError>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn ok(name: &'static str, suggestions: Vec<Suggestion>) -> Self {
        Self {
            name,
            response: Ok(suggestions),
            calls: Default::default(),
        }
    }

    pub fn failing(name: &'static str, message: &str) -> Self {
        Self {
            name,
            response: Err(ProviderError::Http(message.to_string())),
            calls: Default::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl SuggestionProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn suggest(&self, _text: &str) -> Result<Vec<Suggestion>, ProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.response.clone()
    }
}
