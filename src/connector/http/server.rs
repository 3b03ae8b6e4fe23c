use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::connector::api::Container;
use crate::domain::{
    AssistantReply, AssistantResponse, ConversationMessage, Product, ShoppingIntent,
};

use super::ApiError;

#[derive(Clone)]
pub struct AppState {
    container: Arc<Container>,
}

impl AppState {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<ConversationMessage>,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub query: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub history: Vec<ConversationMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assistant/analyze", post(analyze))
        .route("/api/assistant/respond", post(respond))
        .route("/api/assistant/chat", post(chat))
        .with_state(state)
}

pub async fn serve(container: Arc<Container>, port: u16, public: bool) -> anyhow::Result<()> {
    let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let addr = SocketAddr::from((host, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Shopping assistant API listening on http://{addr}");
    axum::serve(listener, router(AppState::new(container))).await?;
    Ok(())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.container.model().to_string(),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<ShoppingIntent> {
    let intent = state
        .container
        .analyze_use_case()
        .analyze(&request.query, &request.history)
        .await
        .into_inner();
    Json(intent)
}

pub async fn respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Json<AssistantResponse> {
    let response = state
        .container
        .generate_use_case()
        .generate(&request.query, &request.products, &request.history)
        .await
        .into_inner();
    Json(response)
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AssistantReply>, ApiError> {
    let reply = state
        .container
        .assistant_use_case()
        .assist(&request.query, &request.history)
        .await?;
    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::connector::api::ContainerConfig;
    use crate::connector::{JsonProductCatalog, MockChatClient};

    fn state(client: MockChatClient) -> AppState {
        let container = Container::with_services(
            Arc::new(client),
            Arc::new(JsonProductCatalog::new(vec![Product::new("1", "Wool Socks", 12.0)])),
            ContainerConfig::default(),
        );
        AppState::new(Arc::new(container))
    }

    #[tokio::test]
    async fn analyze_returns_default_intent_when_model_fails() {
        let request = AnalyzeRequest {
            query: "warm socks".to_string(),
            history: vec![],
        };

        let Json(intent) = analyze(State(state(MockChatClient::failing("down"))), Json(request)).await;

        assert_eq!(intent, ShoppingIntent::default());
    }

    #[tokio::test]
    async fn respond_formats_supplied_products() {
        let request = RespondRequest {
            query: "socks".to_string(),
            products: vec![Product::new("9", "Hiking Socks", 18.0)],
            history: vec![],
        };

        let Json(response) = respond(State(state(MockChatClient::with_reply("Try these!"))), Json(request)).await;

        assert_eq!(response.text, "Try these!");
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].image_url, "/images/placeholder.jpg");
    }

    #[tokio::test]
    async fn analyze_blank_query_returns_default_intent() {
        let request = AnalyzeRequest {
            query: String::new(),
            history: vec![],
        };

        let Json(intent) = analyze(State(state(MockChatClient::failing("down"))), Json(request)).await;

        assert_eq!(intent, ShoppingIntent::default());
    }

    #[tokio::test]
    async fn respond_blank_query_still_answers() {
        let request = RespondRequest {
            query: "  ".to_string(),
            products: vec![Product::new("9", "Hiking Socks", 18.0)],
            history: vec![],
        };

        let Json(response) = respond(State(state(MockChatClient::failing("down"))), Json(request)).await;

        assert_eq!(response.text, "I found 1 product that might interest you!");
        assert_eq!(response.products.len(), 1);
    }

    #[tokio::test]
    async fn chat_rejects_blank_query() {
        let request = AnalyzeRequest {
            query: " ".to_string(),
            history: vec![],
        };

        let err = chat(State(state(MockChatClient::with_reply("{}"))), Json(request))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_model() {
        let Json(health) = health(State(state(MockChatClient::with_reply("{}")))).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.model, "mock-chat");
    }
}
