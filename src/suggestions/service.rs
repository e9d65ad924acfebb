//! Suggestion service
//!
//! Runs the configured providers one after another until one succeeds.

use std::sync::Arc;

use super::gemini::GeminiProvider;
use super::groq::GroqProvider;
use super::provider::SuggestionProvider;
use super::SuggestionError;
use crate::config::Config;
use crate::logging::debug_log;
use crate::types::Suggestion;
use crate::{debug_error, debug_warn};

/// A provider position in the fallback order, possibly left unconfigured
#[derive(Clone)]
pub struct ProviderSlot {
    pub name: &'static str,
    pub provider: Option<Arc<dyn SuggestionProvider>>,
}

impl ProviderSlot {
    pub fn configured(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            name: provider.name(),
            provider: Some(provider),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self { name, provider: None }
    }
}

pub struct SuggestionService {
    slots: Vec<ProviderSlot>,
}

impl SuggestionService {
    /// Slots in fallback order; the first one is the primary provider
    pub fn new(slots: Vec<ProviderSlot>) -> Self {
        Self { slots }
    }

    /// Gemini first, Groq second, each present only when it has credentials
    pub fn from_config(config: &Config) -> Self {
        let gemini = match &config.gemini {
            Some(provider) => ProviderSlot::configured(Arc::new(GeminiProvider::new(provider.clone()))),
            None => ProviderSlot::empty("Gemini"),
        };
        let groq = match &config.groq {
            Some(provider) => ProviderSlot::configured(Arc::new(GroqProvider::new(provider.clone()))),
            None => ProviderSlot::empty("Groq"),
        };
        Self::new(vec![gemini, groq])
    }

    pub fn slots(&self) -> &[ProviderSlot] {
        &self.slots
    }

    /// Try each configured provider once, in slot order. Empty slots are skipped.
    pub async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, SuggestionError> {
        let mut errors = Vec::new();
        for slot in &self.slots {
            let Some(provider) = slot.provider.as_ref() else {
                debug_warn!("⚠️ {} no configurado", slot.name);
                continue;
            };

            debug_log(format!("🤖 Intentando con {}...", provider.name()));
            match provider.suggest(text).await {
                Ok(suggestions) => {
                    debug_log(format!(
                        "✅ {} sugerencias obtenidas con {}",
                        suggestions.len(),
                        provider.name()
                    ));
                    return Ok(suggestions);
                }
                Err(e) => {
                    debug_warn!("❌ Error con {}: {}", provider.name(), e);
                    errors.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        debug_error!("💥 Ningún proveedor respondió: {:?}", errors);
        Err(SuggestionError::AggregatedFailure { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::provider::MockProvider;
    use crate::suggestions::PROVIDERS_UNAVAILABLE_MESSAGE;

    fn suggestion() -> Suggestion {
        Suggestion::new("El ingeniero", "La persona ingeniera")
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = Arc::new(MockProvider::ok("Gemini", vec![suggestion()]));
        let secondary = Arc::new(MockProvider::ok("Groq", vec![]));
        let service = SuggestionService::new(vec![
            ProviderSlot::configured(primary.clone()),
            ProviderSlot::configured(secondary.clone()),
        ]);

        let result = service.suggest("texto").await.unwrap();
        assert_eq!(result, vec![suggestion()]);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn secondary_output_is_returned_when_primary_fails() {
        let primary = Arc::new(MockProvider::failing("Gemini", "quota exceeded"));
        let secondary = Arc::new(MockProvider::ok("Groq", vec![suggestion()]));
        let service = SuggestionService::new(vec![
            ProviderSlot::configured(primary.clone()),
            ProviderSlot::configured(secondary.clone()),
        ]);

        let result = service.suggest("texto").await.unwrap();
        assert_eq!(result, vec![suggestion()]);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn both_failing_aggregates_in_order() {
        let service = SuggestionService::new(vec![
            ProviderSlot::configured(Arc::new(MockProvider::failing("Gemini", "boom"))),
            ProviderSlot::configured(Arc::new(MockProvider::failing("Groq", "bang"))),
        ]);

        let err = service.suggest("texto").await.unwrap_err();
        let SuggestionError::AggregatedFailure { errors } = &err;
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Gemini: "));
        assert!(errors[1].starts_with("Groq: "));
        assert_eq!(err.user_message(), PROVIDERS_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn unconfigured_slot_is_skipped_not_failed() {
        let secondary = Arc::new(MockProvider::ok("Groq", vec![suggestion()]));
        let service = SuggestionService::new(vec![
            ProviderSlot::empty("Gemini"),
            ProviderSlot::configured(secondary.clone()),
        ]);

        assert_eq!(service.suggest("texto").await.unwrap(), vec![suggestion()]);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn no_configured_provider_always_fails() {
        let service = SuggestionService::from_config(&Config::default());
        assert!(service.slots().iter().all(|slot| slot.provider.is_none()));

        let err = service.suggest("texto").await.unwrap_err();
        assert_eq!(err, SuggestionError::AggregatedFailure { errors: vec![] });
    }

    #[tokio::test]
    async fn suggestions_run_on_a_spawned_task() {
        let service = Arc::new(SuggestionService::new(vec![
            ProviderSlot::empty("Gemini"),
            ProviderSlot::configured(Arc::new(MockProvider::ok("Groq", vec![suggestion()]))),
        ]));

        let handle = tokio::spawn(async move { service.suggest("x").await });
        assert_eq!(handle.await.unwrap(), Ok(vec![suggestion()]));
    }
}
