pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::{Commands, OutputFormat};

pub use application::{
    AnalyzeQueryUseCase, ChatClient, GenerateResponseUseCase, ProductCatalog,
    ShoppingAssistantUseCase,
};

pub use connector::{ChatClientConfig, GroqChatClient, JsonProductCatalog, MockChatClient};

pub use domain::{
    format_products, AssistantReply, AssistantResponse, CompletionOptions, CompletionResult,
    ConversationMessage, DomainError, FormattedProduct, PriceRange, Product, ResponseFormat,
    Role, ShoppingIntent, StageOutcome,
};
