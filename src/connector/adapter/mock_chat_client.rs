use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{CompletionOptions, CompletionResult, ConversationMessage, DomainError};

const MOCK_MODEL: &str = "mock-chat";

enum Behaviour {
    /// Replies are consumed in order; the last one repeats once the queue
    /// is down to a single entry.
    Replies(VecDeque<String>),
    Fail(String),
    Offline,
}

type RecordedCall = (Vec<ConversationMessage>, CompletionOptions);

/// Scripted [`ChatClient`] for tests and offline runs.
///
/// Records every request so callers can assert on the messages and options
/// a stage sent.
pub struct MockChatClient {
    behaviour: Mutex<Behaviour>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChatClient {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_replies(vec![reply.into()])
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            behaviour: Mutex::new(Behaviour::Replies(replies.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails like an unreachable endpoint.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behaviour: Mutex::new(Behaviour::Fail(reason.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Offline stand-in used by `--mock-llm`: a neutral intent for JSON
    /// requests and a short canned answer otherwise.
    pub fn offline() -> Self {
        Self {
            behaviour: Mutex::new(Behaviour::Offline),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((messages.to_vec(), options.clone()));
        }

        let mut behaviour = self
            .behaviour
            .lock()
            .map_err(|_| DomainError::internal("MockChatClient: poisoned lock"))?;

        let content = match &mut *behaviour {
            Behaviour::Fail(reason) => {
                return Err(DomainError::completion(format!(
                    "MockChatClient: {reason}"
                )))
            }
            Behaviour::Replies(replies) => {
                let reply = if replies.len() > 1 {
                    replies.pop_front()
                } else {
                    replies.front().cloned()
                };
                reply.unwrap_or_default()
            }
            Behaviour::Offline => offline_reply(options),
        };

        debug!("MockChatClient replying with {} chars", content.len());

        Ok(CompletionResult {
            content,
            model: Some(options.model.clone().unwrap_or_else(|| MOCK_MODEL.to_string())),
            total_tokens: None,
        })
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }
}

fn offline_reply(options: &CompletionOptions) -> String {
    if options.wants_json() {
        "{}".to_string()
    } else {
        "Here are some options I picked for you. Would you like me to narrow them down?"
            .to_string()
    }
}
