//! Gemini provider (primary)

use async_trait::async_trait;
use serde_json::{json, Value};

use super::parse::parse_suggestions;
use super::prompt::build_prompt;
use super::provider::SuggestionProvider;
use super::ProviderError;
use crate::config::ProviderConfig;
use crate::types::Suggestion;

pub struct GeminiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, self.config.model)
    }

    /// Request body with a JSON schema forcing an array of pairs
    pub fn request_body(text: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "original": {
                                "type": "STRING",
                                "description": "La frase original exacta del texto que no es inclusiva."
                            },
                            "inclusive": {
                                "type": "STRING",
                                "description": "La versión reescrita y más inclusiva de la frase."
                            }
                        },
                        "required": ["original", "inclusive"]
                    }
                }
            }
        })
    }

    /// Concatenated text parts of the first candidate
    pub fn response_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl SuggestionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&Self::request_body(text))
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

        let result: Value = response.json().await?;
        let content = Self::response_text(&result)
            .ok_or_else(|| ProviderError::EmptyResponse(self.name().to_string()))?;

        parse_suggestions(self.name(), &content)
    }
}

/// Pull `error.message` out of a Google-style error body, else keep the raw body
pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
