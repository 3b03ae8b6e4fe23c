use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::{AnalyzeQueryUseCase, GenerateResponseUseCase, ProductCatalog};
use crate::domain::{AssistantReply, ConversationMessage, DomainError};

/// Runs one assistant turn: intent extraction, catalog lookup, then
/// response generation.
///
/// The two model calls run strictly in sequence since the catalog needs the
/// intent before response generation can start.
pub struct ShoppingAssistantUseCase {
    analyze: AnalyzeQueryUseCase,
    generate: GenerateResponseUseCase,
    catalog: Arc<dyn ProductCatalog>,
}

impl ShoppingAssistantUseCase {
    pub fn new(
        analyze: AnalyzeQueryUseCase,
        generate: GenerateResponseUseCase,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            analyze,
            generate,
            catalog,
        }
    }

    pub async fn assist(
        &self,
        query: &str,
        history: &[ConversationMessage],
    ) -> Result<AssistantReply, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::invalid_input("query must not be empty"));
        }

        let start_time = Instant::now();

        let intent_outcome = self.analyze.analyze(query, history).await;
        let intent_fallback = intent_outcome.is_fallback();
        let intent = intent_outcome.into_inner();

        let products = match self.catalog.find_products(&intent).await {
            Ok(products) => products,
            Err(e) => {
                warn!("Catalog lookup failed: {e}. Continuing with no products.");
                Vec::new()
            }
        };
        info!("Catalog returned {} candidate products", products.len());

        let response_outcome = self.generate.generate(query, &products, history).await;
        let response_fallback = response_outcome.is_fallback();
        let response = response_outcome.into_inner();

        info!(
            "Assistant turn finished in {:.2}s (intent_fallback={}, response_fallback={})",
            start_time.elapsed().as_secs_f64(),
            intent_fallback,
            response_fallback,
        );

        Ok(AssistantReply {
            intent,
            text: response.text,
            products: response.products,
            intent_fallback,
            response_fallback,
        })
    }
}
