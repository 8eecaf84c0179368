use super::LlmClient;
use crate::error::Error;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimal request/response structs for OpenAI Chat Completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<String>,
}

const CONTEXT_LENGTH_EXCEEDED: &str = "context_length_exceeded";

/// OpenAI-based implementation of LlmClient.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        model: String,
        api_base_url: String,
        temperature: f32,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| Error::CompletionRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(OpenAiClient {
            client,
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            temperature,
        })
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }

    fn call_chat(&self, req: &ChatRequest) -> Result<String, Error> {
        let url = self.chat_url();

        log::info!("Calling OpenAI model {:?} at {}", req.model, url);

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .map_err(|e| Error::CompletionRequest(describe(e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            log::debug!("OpenAI error body: {}", text);
            return Err(map_api_error(status, text));
        }

        let chat_resp: ChatResponse = resp.json().map_err(|e| {
            Error::CompletionRequest(format!("failed to parse OpenAI response: {}", describe(e)))
        })?;

        if let Some(usage) = &chat_resp.usage {
            log::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let content = chat_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::CompletionRequest("no choices returned from OpenAI".into()))?
            .message
            .content
            .unwrap_or_default();

        let message = content.trim();
        if message.is_empty() {
            return Err(Error::CompletionRequest("OpenAI returned an empty message".into()));
        }

        Ok(message.to_string())
    }
}

impl LlmClient for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, Error> {
        log::trace!("Commit-message prompt:\n{}", truncate(prompt, 3000));

        let req = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Asking OpenAI for a commit message...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.call_chat(&req);
        spinner.finish_and_clear();
        result
    }
}

/// Provider-reported context overflows get the same treatment as the local guard.
fn map_api_error(status: StatusCode, body: String) -> Error {
    if status == StatusCode::BAD_REQUEST {
        let code = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.code);
        if code.as_deref() == Some(CONTEXT_LENGTH_EXCEEDED) {
            return Error::ContextTooLarge { usage: None };
        }
    }

    Error::CompletionHttp {
        status: status.as_u16(),
        body,
    }
}

/// Render a transport error with its full cause chain.
fn describe(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...\n[truncated {} chars]", &s[..end], s.len() - end)
}
