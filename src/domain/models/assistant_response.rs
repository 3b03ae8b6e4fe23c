use serde::{Deserialize, Serialize};

use super::{FormattedProduct, ShoppingIntent};

/// The unit returned to the caller by response generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    pub products: Vec<FormattedProduct>,
}

impl AssistantResponse {
    pub fn new(text: impl Into<String>, products: Vec<FormattedProduct>) -> Self {
        Self {
            text: text.into(),
            products,
        }
    }
}

/// Result of a full assistant turn: intent extraction, catalog lookup and
/// response generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub intent: ShoppingIntent,
    pub text: String,
    pub products: Vec<FormattedProduct>,
    /// Whether intent extraction fell back to the default intent.
    pub intent_fallback: bool,
    /// Whether the response text is the canned fallback.
    pub response_fallback: bool,
}
