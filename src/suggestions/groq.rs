//! Groq provider (secondary), OpenAI-compatible chat completions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::gemini::api_error_message;
use super::parse::parse_suggestions_lenient;
use super::prompt::build_prompt;
use super::provider::SuggestionProvider;
use super::ProviderError;
use crate::config::ProviderConfig;
use crate::types::Suggestion;

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

impl ChatResponse {
    /// Content of the first choice, if it has any text
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

pub struct GroqProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl GroqProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(build_prompt(text)),
            }],
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl SuggestionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                body: api_error_message(&body),
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .content()
            .ok_or_else(|| ProviderError::EmptyResponse(self.name().to_string()))?;

        // Chat models do not honour a response schema, so accept prose around the array
        parse_suggestions_lenient(self.name(), content)
    }
}
