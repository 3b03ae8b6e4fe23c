use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::ChatClient;
use crate::domain::{
    build_messages, CompletionOptions, ConversationMessage, DomainError, ResponseFormat,
    ShoppingIntent, StageOutcome,
};

/// Intent extraction should be close to deterministic.
const INTENT_TEMPERATURE: f32 = 0.1;

const SYSTEM_PROMPT: &str = "\
You are a shopping query understanding system. Analyze the user's query and extract \
shopping intent as valid JSON with these exact fields:
- categories: array of relevant product categories
- attributes: array of key attributes like \"gift\", \"for_her\", \"eco_friendly\"
- price_range: object with min and max numbers
- occasion: string like \"birthday\", \"anniversary\", \"personal use\"
- style: string like \"modern\", \"vintage\", \"minimalist\"
- use_case: string describing the primary use

Return ONLY JSON, no other text.";

/// Turns a free-text shopping query into a [`ShoppingIntent`].
///
/// Never fails: a completion error or an unparseable reply yields
/// [`StageOutcome::Fallback`] carrying [`ShoppingIntent::default`].
pub struct AnalyzeQueryUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl AnalyzeQueryUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn analyze(
        &self,
        query: &str,
        history: &[ConversationMessage],
    ) -> StageOutcome<ShoppingIntent> {
        match self.extract(query, history).await {
            Ok(intent) => {
                info!("Extracted intent: {intent:?}");
                StageOutcome::Generated(intent)
            }
            Err(e) => {
                warn!("Query understanding failed: {e}. Falling back to default intent.");
                StageOutcome::fallback(ShoppingIntent::default(), e.to_string())
            }
        }
    }

    async fn extract(
        &self,
        query: &str,
        history: &[ConversationMessage],
    ) -> Result<ShoppingIntent, DomainError> {
        let messages = Self::build_request(query, history);
        let options = CompletionOptions::new()
            .with_temperature(INTENT_TEMPERATURE)
            .with_response_format(ResponseFormat::JsonObject);

        let result = self.chat_client.complete(&messages, &options).await?;
        debug!("Intent raw response: {}", result.content);

        ShoppingIntent::from_json(&result.content)
    }

    pub(crate) fn build_request(
        query: &str,
        history: &[ConversationMessage],
    ) -> Vec<ConversationMessage> {
        build_messages(SYSTEM_PROMPT, history, format!("User Query: \"{query}\""))
    }
}
