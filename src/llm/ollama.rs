//! Ollama engine (local models)

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{ChatEngine, LlmError, LlmResult, Message};
use crate::config::EngineSettings;

/// Ollama generation engine
pub struct OllamaEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEngine {
    /// Create a new Ollama engine from configuration.
    ///
    /// No request is made here; connectivity is only checked by
    /// [`ChatEngine::list_models`] or the first [`ChatEngine::chat`].
    pub fn new(settings: &EngineSettings) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }

    fn convert_messages(messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|m| {
                json!({
                    "role": m.role.to_string(),
                    "content": m.content,
                })
            })
            .collect()
    }

    async fn check_status(response: reqwest::Response) -> LlmResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatEngine for OllamaEngine {
    fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn chat(&self, messages: &[Message]) -> LlmResult<String> {
        let body = json!({
            "model": self.model,
            "messages": Self::convert_messages(messages),
            "stream": false,
        });

        debug!(model = %self.model, messages = messages.len(), "posting chat request to ollama");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let chat: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse chat response: {}", e)))?;

        Ok(chat.message.content)
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse model list: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}
