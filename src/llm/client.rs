// =============================================================================
// OpenAI Chat Completions Client
// =============================================================================
//
// One-shot completions: a fixed system persona plus the user's question. No
// streaming, no retry; a provider failure surfaces to the handler as an
// error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Completion cap for a single answer.
const MAX_COMPLETION_TOKENS: u32 = 1024;
/// Returned when the provider sends back an empty choice.
const EMPTY_COMPLETION_FALLBACK: &str = "Unable to generate response";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat-completions client.
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("failed to build reqwest client");

        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// POST /chat/completions — answer `user` under the `system` persona.
    ///
    /// Returns the first choice's text, or a fixed fallback string when the
    /// provider responds without content.
    #[instrument(skip(self, system, user), name = "llm::complete")]
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("POST /chat/completions request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("chat completions returned {}: {}", status, body);
        }

        let body: CompletionResponse = resp
            .json()
            .await
            .context("failed to parse chat completion response")?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string());

        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
