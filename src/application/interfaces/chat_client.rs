use async_trait::async_trait;

use crate::domain::{CompletionOptions, CompletionResult, ConversationMessage, DomainError};

/// An interface for sending role-tagged messages to a chat-completion
/// capability and receiving the generated message.
///
/// Implementors encapsulate transport, authentication, serialization and
/// vendor-specific API details. Pipeline stages only see this trait, so it
/// can be swapped for [`crate::connector::MockChatClient`] in tests.
///
/// Implementations must not retry: a failed call is reported once and the
/// caller decides what to do with it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, DomainError>;

    /// Model used when the options do not name one.
    fn default_model(&self) -> &str;
}
