//! LLM client: the single point of entry for all Claude API calls.
//!
//! Analysis code never talks to the Anthropic API directly; it goes through
//! the `TextModel` trait, which `LlmClient` implements.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls. Hardcoded so reviews stay comparable.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Maps an upstream status to the message shown to résumé owners.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::Api { status: 400, .. } => {
                "Invalid request. Please check your resume content.".to_string()
            }
            LlmError::Api { status: 401, .. } => "Analyzer credentials are invalid.".to_string(),
            LlmError::Api { status: 403, .. } => "Analyzer access denied.".to_string(),
            LlmError::Api { status: 429, .. } | LlmError::RateLimited { .. } => {
                "Rate limit exceeded. Please try again in a few minutes.".to_string()
            }
            LlmError::Api { status, .. } if *status >= 500 => {
                "Analyzer is temporarily unavailable. Please try again later.".to_string()
            }
            LlmError::Api { status, message } => format!("Analyzer error ({status}): {message}"),
            LlmError::Http(_) => "Network error while contacting the analyzer.".to_string(),
            LlmError::EmptyContent => "The analyzer returned no content.".to_string(),
        }
    }
}

/// Plain text in, plain text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Concatenates every text block, in order.
    pub fn text(&self) -> Option<String> {
        let joined: Vec<&str> = self
            .content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined.join(""))
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, api_key })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextModel for LlmClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_fences(&text).to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

/// Strips ```text ... ``` or ``` ... ``` code fences from LLM output.
fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (```markdown, ```text) up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) if !rest[..idx].contains(' ') => &rest[idx + 1..],
        _ => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or_else(|| body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let input = "```markdown\n## Resume Summary\n- solid\n```";
        assert_eq!(strip_fences(input), "## Resume Summary\n- solid");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n1. ATS Score: 80\n```";
        assert_eq!(strip_fences(input), "1. ATS Score: 80");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "  plain feedback  ";
        assert_eq!(strip_fences(input), "plain feedback");
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "text", "text": "## Resume "},
                {"type": "tool_use"},
                {"type": "text", "text": "Summary"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 3}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("## Resume Summary"));
    }

    #[test]
    fn test_response_text_none_without_text_blocks() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [],
            "usage": {"input_tokens": 1, "output_tokens": 0}
        }))
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_user_message_maps_statuses() {
        let limited = LlmError::Api {
            status: 429,
            message: "slow down".into(),
        };
        assert!(limited.user_message().starts_with("Rate limit exceeded"));
        let down = LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        };
        assert!(down.user_message().contains("temporarily unavailable"));
        let other = LlmError::Api {
            status: 404,
            message: "no such model".into(),
        };
        assert_eq!(other.user_message(), "Analyzer error (404): no such model");
    }
}
