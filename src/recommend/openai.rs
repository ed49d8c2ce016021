use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::RecommendError;

/// Sampling temperature for triage requests. Low: this is selection
/// from a fixed list, not prose.
const TRIAGE_TEMPERATURE: f64 = 0.2;

/// A synchronous chat-completion backend. One attempt per call, no
/// retries — callers decide what a failure means.
pub trait CompletionClient {
    fn complete(&self, model: &str, system: &str, user: &str) -> Result<String, RecommendError>;
}

/// Chat-completions client for OpenAI-compatible endpoints.
///
/// Uses a blocking HTTP client, so construct it outside the async
/// runtime and call `complete` from a blocking task.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response envelope from /chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, model: &str, system: &str, user: &str) -> Result<String, RecommendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: TRIAGE_TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RecommendError::HttpClient(format!("Cannot reach {}", self.base_url))
                } else if e.is_timeout() {
                    RecommendError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    RecommendError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RecommendError::CompletionApi {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| RecommendError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RecommendError::MalformedResponse("reply held no choices".into()))
    }
}

/// Mock completion client for testing — returns a configurable reply
/// (or fails every call) and records the prompts it receives.
pub struct MockCompletionClient {
    reply: Option<String>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl MockCompletionClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client whose every call fails with a transport error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the user prompts received so far. Clone it before
    /// boxing the mock into a recommender.
    pub fn seen_prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen)
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, _model: &str, _system: &str, user: &str) -> Result<String, RecommendError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(user.to_string());
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(RecommendError::HttpClient("mock transport failure".into())),
        }
    }
}
