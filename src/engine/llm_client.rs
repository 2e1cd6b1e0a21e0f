use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::engine::error::TransportError;

/// One textual request, one textual reply.
#[cfg_attr(test, mockall::automock)]
pub trait NarrationService {
    fn complete(&self, prompt: &str) -> Result<String, TransportError>;
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: String,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// Client for OpenAI-compatible chat completion endpoints.
pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Lists the models behind the endpoint to confirm it is reachable and
    /// the credential is accepted.
    pub fn check_connection(&self) -> Result<String, TransportError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()?;

        let models: ModelList = ensure_success(response)?.json()?;
        Ok(format!("Connected ({} models available)", models.data.len()))
    }
}

impl NarrationService for OpenAiChatClient {
    fn complete(&self, prompt: &str) -> Result<String, TransportError> {
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "system".into(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()?;

        first_content(ensure_success(response)?.json()?)
    }
}

/// Turns a non-2xx reply into [`TransportError::Status`], keeping the body
/// for the diagnostic.
fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Content of the first choice; a reply with no choices is an error.
pub fn first_content(response: ChatCompletionResponse) -> Result<String, TransportError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(TransportError::EmptyResponse)
}
