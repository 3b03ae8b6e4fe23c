use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{
    CompletionOptions, CompletionResult, ConversationMessage, DomainError, ResponseFormat,
};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Small, inexpensive model; good enough for intent extraction and short replies.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const API_URL_VAR: &str = "GROQ_API_URL";
pub const MODEL_VAR: &str = "GROQ_MODEL";

/// Problems found while configuring the client. None of them prevent
/// construction; the owner decides how to report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigDiagnostic {
    MissingApiKey,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "{API_KEY_VAR} not set; chat completion calls will fail and the assistant will answer with fallbacks"
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ChatClientConfig {
    /// Read configuration from the environment:
    ///
    /// | Variable       | Default                                           |
    /// |----------------|---------------------------------------------------|
    /// | `GROQ_API_KEY` | none (calls fail, construction does not)          |
    /// | `GROQ_API_URL` | `https://api.groq.com/openai/v1/chat/completions` |
    /// | `GROQ_MODEL`   | `llama3-8b-8192`                                  |
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let api_url =
            std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            api_url,
            model,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ApiResponseFormat>,
}

#[derive(Serialize)]
struct ApiResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

/// HTTP client for OpenAI-compatible chat completion endpoints (Groq by
/// default).
///
/// Holds only immutable configuration and a pooled `reqwest::Client`, so one
/// instance can be shared across concurrent requests. Every call is bounded
/// by [`REQUEST_TIMEOUT`]; transport errors, timeouts, non-success statuses
/// and unusable payloads all surface as [`DomainError::Completion`].
pub struct GroqChatClient {
    client: reqwest::Client,
    config: ChatClientConfig,
    diagnostics: Vec<ConfigDiagnostic>,
}

impl GroqChatClient {
    pub fn new(config: ChatClientConfig) -> Self {
        let mut diagnostics = Vec::new();
        if config.api_key.is_none() {
            diagnostics.push(ConfigDiagnostic::MissingApiKey);
        }

        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
            diagnostics,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ChatClientConfig::from_env())
    }

    pub fn diagnostics(&self) -> &[ConfigDiagnostic] {
        &self.diagnostics
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::completion_with_upstream(
                format!(
                    "GroqChatClient: request timed out after {:?}",
                    self.config.timeout
                ),
                e.to_string(),
            )
        } else {
            DomainError::completion_with_upstream("GroqChatClient: request failed", e.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, DomainError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::completion(format!("GroqChatClient: {API_KEY_VAR} is not configured")))?;

        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let request = ApiRequest {
            model,
            messages,
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
            response_format: match options.response_format {
                Some(ResponseFormat::JsonObject) => Some(ApiResponseFormat {
                    kind: "json_object",
                }),
                Some(ResponseFormat::Text) | None => None,
            },
        };

        debug!(
            "GroqChatClient: sending {} messages to {} (model={model})",
            messages.len(),
            self.config.api_url
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GroqChatClient: API returned {status}: {body}");
            return Err(DomainError::completion_with_upstream(
                format!("GroqChatClient: API returned {status}"),
                body,
            ));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::completion_with_upstream(
                "GroqChatClient: failed to parse response",
                e.to_string(),
            )
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DomainError::completion("GroqChatClient: response contained no message"))?;

        Ok(CompletionResult {
            content,
            model: api_response.model,
            total_tokens: api_response.usage.and_then(|u| u.total_tokens),
        })
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_diagnostic_not_an_error() {
        let client = GroqChatClient::new(ChatClientConfig::default());
        assert_eq!(client.diagnostics(), &[ConfigDiagnostic::MissingApiKey]);
    }

    #[test]
    fn configured_key_has_no_diagnostics() {
        let client = GroqChatClient::new(ChatClientConfig {
            api_key: Some("gsk_test".to_string()),
            ..ChatClientConfig::default()
        });
        assert!(client.diagnostics().is_empty());
        assert_eq!(client.default_model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn call_without_key_fails_without_network() {
        let client = GroqChatClient::new(ChatClientConfig {
            api_url: "http://127.0.0.1:9/unreachable".to_string(),
            ..ChatClientConfig::default()
        });

        let err = client
            .complete(&[ConversationMessage::user("hi")], &CompletionOptions::new())
            .await
            .unwrap_err();

        assert!(err.is_completion_error());
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn request_omits_response_format_unless_json() {
        let messages = [ConversationMessage::user("hi")];
        let request = |response_format| ApiRequest {
            model: "m",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 300,
            response_format,
        };

        let plain = serde_json::to_value(request(None)).unwrap();
        let json = serde_json::to_value(request(Some(ApiResponseFormat { kind: "json_object" })))
            .unwrap();

        assert!(plain.get("response_format").is_none());
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 300);
    }
}
