//! Ollama HTTP API client
//!
//! Talks to an Ollama server's chat endpoint to generate task suggestions.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::Result;

/// Chat model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemma3:4b-it-qat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the Ollama chat API
///
/// Stateless: each call is an independent round trip with no retry and no
/// caching of prior replies.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Ask the model for completion steps for a task title.
    ///
    /// The title is embedded in the prompt verbatim; the model's textual
    /// reply is returned unmodified.
    pub async fn suggest(&self, title: &str) -> Result<String> {
        let prompt = format!("Just answer only steps for this task short: '{}'?", title);

        let req = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        debug!("Requesting suggestion from {}/api/chat", self.base_url);

        let res = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&req)
            .send()
            .await
            .map_err(|e| Error::Ollama(format!("Failed to reach Ollama: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            // Ollama error payloads are {"error": "..."}; fall back to raw body
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(Error::Ollama(format!("HTTP {}: {}", status, detail)));
        }

        let reply: ChatResponse = res
            .json()
            .await
            .map_err(|e| Error::Ollama(format!("Failed to parse chat response: {}", e)))?;

        Ok(reply.message.content)
    }
}
