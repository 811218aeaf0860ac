pub mod config;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::BotError;
use crate::llm::config::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::models::StoredMessage;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const MODEL: &str = "deepseek/deepseek-r1-0528-qwen3-8b:free";

/// Клиент модели: один запрос — один ответ, без стриминга.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[StoredMessage],
        user_text: &str,
    ) -> Result<String, BotError>;
}

#[derive(Clone)]
pub struct Gpt {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Gpt {
    pub fn new(api_key: String) -> Self {
        Gpt {
            client: Client::new(),
            api_key,
            base_url: OPENROUTER_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for Gpt {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[StoredMessage],
        user_text: &str,
    ) -> Result<String, BotError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        for turn in history {
            messages.push(ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        let request = ChatCompletionRequest {
            model: MODEL.to_string(),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BotError::ModelError(format!("status {}: {}", status, text)));
        }

        let response = serde_json::from_str::<ChatCompletionResponse>(&text)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BotError::ModelError("empty completion".to_string()))
    }
}
