use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{
    build_messages, format_products, AssistantResponse, CompletionOptions, ConversationMessage,
    DomainError, Product, StageOutcome,
};

const RESPONSE_TEMPERATURE: f32 = 0.7;
const RESPONSE_MAX_TOKENS: u32 = 300;

/// Rendered in place of an empty or missing feature list.
pub const NO_FEATURES_MARKER: &str = "None specified";

const ASSISTANT_PERSONA: &str = "\
You are a friendly, knowledgeable shopping assistant for MarketConnect. \
Be helpful, enthusiastic but not pushy. Highlight key features and benefits. \
Mention price, rating, and specific advantages. Be concise but warm. \
Always end with an open question that keeps the conversation going. \
If no products match, suggest alternative search terms or categories.";

const NO_PRODUCTS_CONTEXT: &str = "\
No products match the user's criteria. Suggest alternative search terms or broader categories.";

/// Writes the recommendation text for a set of candidate products.
///
/// Never fails: when the completion call fails the text is replaced by a
/// deterministic message, and the product payload is still returned.
pub struct GenerateResponseUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl GenerateResponseUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn generate(
        &self,
        query: &str,
        products: &[Product],
        history: &[ConversationMessage],
    ) -> StageOutcome<AssistantResponse> {
        let formatted = format_products(products);

        match self.write_text(query, products, history).await {
            Ok(text) => StageOutcome::Generated(AssistantResponse::new(text, formatted)),
            Err(e) => {
                warn!("Response generation failed: {e}. Using fallback text.");
                StageOutcome::fallback(
                    AssistantResponse::new(fallback_text(products.len()), formatted),
                    e.to_string(),
                )
            }
        }
    }

    async fn write_text(
        &self,
        query: &str,
        products: &[Product],
        history: &[ConversationMessage],
    ) -> Result<String, DomainError> {
        let prompt = build_prompt(query, &render_product_context(products));
        let messages = build_messages(ASSISTANT_PERSONA, history, prompt);
        let options = CompletionOptions::new()
            .with_temperature(RESPONSE_TEMPERATURE)
            .with_max_tokens(RESPONSE_MAX_TOKENS);

        let result = self.chat_client.complete(&messages, &options).await?;
        let text = result.content.trim();
        if text.is_empty() {
            return Err(DomainError::completion("model returned an empty message"));
        }

        debug!("Generated response of {} chars", text.len());
        Ok(text.to_string())
    }
}

/// Render the candidate products for the prompt, 1-indexed.
pub fn render_product_context(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_CONTEXT.to_string();
    }

    products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let features = match product.features.as_deref() {
                Some(features) if !features.is_empty() => features.join(", "),
                _ => NO_FEATURES_MARKER.to_string(),
            };
            format!(
                "Product {}:\n\
                 - Name: {}\n\
                 - Price: ${}\n\
                 - Rating: {}/5 stars ({} reviews)\n\
                 - Category: {}\n\
                 - Description: {}\n\
                 - Key Features: {}\n",
                i + 1,
                product.name,
                product.price,
                product.rating,
                product.review_count(),
                product.category,
                product.description,
                features,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(query: &str, product_context: &str) -> String {
    format!(
        "User's current request: \"{query}\"\n\n\
         Available products that match their needs:\n\
         {product_context}\n\n\
         Please provide a helpful response that:\n\
         1. Acknowledges their request naturally\n\
         2. Recommends the best options with specific reasons\n\
         3. Mentions price, rating, and key features\n\
         4. Ends with an open question to continue the conversation\n\n\
         Keep it conversational and under 150 words."
    )
}

/// Deterministic text used when the model cannot be reached.
pub fn fallback_text(product_count: usize) -> String {
    match product_count {
        0 => "I couldn't find any matching products for your criteria. Try broadening your search."
            .to_string(),
        1 => "I found 1 product that might interest you!".to_string(),
        n => format!("I found {n} products that might interest you!"),
    }
}
