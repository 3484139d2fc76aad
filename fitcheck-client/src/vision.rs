//! Outfit analysis client
//!
//! Talks to an OpenAI-compatible chat-completions endpoint with a
//! vision-capable model.

use async_trait::async_trait;
use fitcheck_core::domain::analysis::OutfitAnalysis;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::{handle_response, normalize_base_url};

/// Default chat-completions base URL
pub const DEFAULT_VISION_URL: &str = "https://api.openai.com";

/// Default vision-capable model
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a fashion expert analyzing outfits.";
const USER_PROMPT: &str = "Analyze this outfit and provide style feedback.";

/// Produces styling feedback for an outfit photo
#[async_trait]
pub trait OutfitAnalyzer: Send + Sync {
    /// `image_url` is a public URL or a base64 data URL
    async fn analyze(&self, image_url: &str) -> Result<OutfitAnalysis>;
}

/// HTTP client for the chat-completions API
#[derive(Debug, Clone)]
pub struct VisionClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl VisionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_VISION_URL, api_key, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            model: DEFAULT_VISION_MODEL.to_string(),
            client,
        }
    }

    /// Use another model than [`DEFAULT_VISION_MODEL`]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_request<'a>(model: &'a str, image_url: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(SYSTEM_PROMPT),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: USER_PROMPT },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    },
                ]),
            },
        ],
    }
}

#[async_trait]
impl OutfitAnalyzer for VisionClient {
    async fn analyze(&self, image_url: &str) -> Result<OutfitAnalysis> {
        if image_url.is_empty() {
            return Err(ClientError::InvalidRequest("No image provided".to_string()));
        }

        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, "Requesting outfit analysis");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request(&self.model, image_url))
            .send()
            .await?;

        let chat: ChatResponse = handle_response(response).await?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|message| OutfitAnalysis { message })
            .ok_or_else(|| ClientError::ParseError("Chat response has no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_carries_image_part() {
        let json = serde_json::to_value(chat_request("gpt-4o-mini", "https://img/outfit.jpg")).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(json["messages"][1]["content"][0]["type"], "text");
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "https://img/outfit.jpg"
        );
    }

    #[test]
    fn test_with_model() {
        let client = VisionClient::new("sk-test").with_model("gpt-4o");
        assert_eq!(client.model(), "gpt-4o");
    }
}
