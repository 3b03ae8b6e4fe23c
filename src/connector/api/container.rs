use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::application::{
    AnalyzeQueryUseCase, ChatClient, GenerateResponseUseCase, ProductCatalog,
    ShoppingAssistantUseCase,
};
use crate::connector::adapter::{GroqChatClient, JsonProductCatalog, MockChatClient};

pub struct ContainerConfig {
    /// Use the offline [`MockChatClient`] instead of the HTTP API.
    pub mock_llm: bool,
    /// JSON file with the product catalog used by full assistant turns.
    /// Without one the catalog is empty and every turn gets the
    /// "no matching products" answer.
    pub catalog_path: Option<String>,
    pub catalog_limit: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_llm: false,
            catalog_path: None,
            catalog_limit: crate::connector::adapter::DEFAULT_LIMIT,
        }
    }
}

/// Wires adapters into use cases. Holds only shared, read-only services.
pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    catalog: Arc<dyn ProductCatalog>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::offline())
        } else {
            let client = GroqChatClient::from_env();
            for diagnostic in client.diagnostics() {
                warn!("Chat client configuration: {diagnostic}");
            }
            info!("Chat completion API configured at {}", client.api_url());
            Arc::new(client)
        };

        let catalog = match config.catalog_path.as_deref() {
            Some(path) => JsonProductCatalog::from_file(path)?,
            None => {
                debug!("No catalog configured; using an empty catalog");
                JsonProductCatalog::empty()
            }
        }
        .with_limit(config.catalog_limit);

        Ok(Self::with_services(chat_client, Arc::new(catalog), config))
    }

    /// Build a container around existing services (tests, embedding).
    pub fn with_services(
        chat_client: Arc<dyn ChatClient>,
        catalog: Arc<dyn ProductCatalog>,
        config: ContainerConfig,
    ) -> Self {
        Self {
            chat_client,
            catalog,
            config,
        }
    }

    pub fn analyze_use_case(&self) -> AnalyzeQueryUseCase {
        AnalyzeQueryUseCase::new(self.chat_client.clone())
    }

    pub fn generate_use_case(&self) -> GenerateResponseUseCase {
        GenerateResponseUseCase::new(self.chat_client.clone())
    }

    pub fn assistant_use_case(&self) -> ShoppingAssistantUseCase {
        ShoppingAssistantUseCase::new(
            self.analyze_use_case(),
            self.generate_use_case(),
            self.catalog.clone(),
        )
    }

    pub fn model(&self) -> &str {
        self.chat_client.default_model()
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.config.catalog_path.as_deref()
    }
}
