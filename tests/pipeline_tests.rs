//! End-to-end tests for the shopping assistant pipeline using the scripted
//! chat client.

use std::sync::Arc;

use shopping_assistant::application::render_product_context;
use shopping_assistant::connector::api::{Container, ContainerConfig};
use shopping_assistant::{
    format_products, AnalyzeQueryUseCase, ConversationMessage, GenerateResponseUseCase,
    JsonProductCatalog, MockChatClient, PriceRange, Product, Role, ShoppingIntent,
};

fn products(n: usize) -> Vec<Product> {
    (1..=n)
        .map(|i| {
            Product::new(format!("p{i}"), format!("Candle {i}"), 10.0 * i as f64)
                .with_category("home")
                .with_rating(4.0, 10)
        })
        .collect()
}

#[tokio::test]
async fn test_intent_round_trip() {
    let json = r#"{"categories":["gifts"],"attributes":["eco_friendly"],"price_range":{"min":10,"max":50},"occasion":"birthday","style":"modern","use_case":"gift for friend"}"#;
    let use_case = AnalyzeQueryUseCase::new(Arc::new(MockChatClient::with_reply(json)));

    let intent = use_case.analyze("eco birthday gift", &[]).await.into_inner();

    assert_eq!(intent, ShoppingIntent::from_json(json).unwrap());
    assert_eq!(intent.categories, vec!["gifts"]);
    assert_eq!(intent.attributes, vec!["eco_friendly"]);
    assert_eq!(intent.price_range, PriceRange { min: 10.0, max: 50.0 });
    assert_eq!(intent.occasion, "birthday");
    assert_eq!(intent.style, "modern");
    assert_eq!(intent.use_case, "gift for friend");
}

#[tokio::test]
async fn test_intent_always_has_ordered_price_range() {
    let replies = [
        r#"{"price_range":{"min":500,"max":5}}"#,
        r#"{"price_range":null}"#,
        r#"{}"#,
        "not json",
    ];

    for reply in replies {
        let use_case = AnalyzeQueryUseCase::new(Arc::new(MockChatClient::with_reply(reply)));
        let intent = use_case.analyze("anything", &[]).await.into_inner();
        assert!(
            intent.price_range.min <= intent.price_range.max,
            "unordered range for reply {reply}"
        );
    }
}

#[tokio::test]
async fn test_unreachable_model_with_no_products() {
    let use_case = GenerateResponseUseCase::new(Arc::new(MockChatClient::failing("unreachable")));

    let response = use_case.generate("flying carpet", &[], &[]).await.into_inner();

    assert!(response.text.contains("couldn't find any matching products"));
    assert!(response.products.is_empty());
}

#[tokio::test]
async fn test_unreachable_model_with_three_products() {
    let use_case = GenerateResponseUseCase::new(Arc::new(MockChatClient::failing("unreachable")));

    let outcome = use_case.generate("candles", &products(3), &[]).await;

    assert!(outcome.is_fallback());
    let response = outcome.into_inner();
    assert!(response.text.contains('3'));
    assert!(response.text.contains("products"));
    assert_eq!(response.products.len(), 3);
}

#[test]
fn test_context_marks_product_without_features() {
    let product: Product =
        serde_json::from_str(r#"{"_id":"x1","name":"Plain Notebook","price":6.5}"#).unwrap();

    let context = render_product_context(&[product]);

    assert!(context.contains("None specified"));
}

#[test]
fn test_format_products_is_total() {
    let raw = r#"[
        {"_id":"a","name":"A","price":1},
        {"_id":"b","name":"B","price":2,"images":[]},
        {"_id":"c","name":"C","price":3,"images":[{"url":"/img/c.png"}],"tags":["sale"]}
    ]"#;
    let products: Vec<Product> = serde_json::from_str(raw).unwrap();

    let formatted = format_products(&products);

    assert_eq!(formatted.len(), products.len());
    assert!(formatted.iter().all(|p| !p.image_url.is_empty()));
    assert_eq!(formatted[2].image_url, "/img/c.png");
    assert_eq!(formatted[2].tags, vec!["sale"]);
}

#[tokio::test]
async fn test_history_reaches_both_stages() {
    let client = Arc::new(MockChatClient::with_replies(vec![
        r#"{"categories":["home"],"price_range":{"min":0,"max":25}}"#.to_string(),
        "Candle 1 and Candle 2 both fit. Which scent do you like?".to_string(),
    ]));
    let container = Container::with_services(
        client.clone(),
        Arc::new(JsonProductCatalog::new(products(5))),
        ContainerConfig::default(),
    );
    let history = vec![
        ConversationMessage::user("I want something cozy"),
        ConversationMessage::assistant("How about candles?"),
    ];

    let reply = container
        .assistant_use_case()
        .assist("yes, under $25", &history)
        .await
        .unwrap();

    assert_eq!(reply.intent.price_range, PriceRange { min: 0.0, max: 25.0 });
    assert_eq!(reply.products.len(), 2);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    for (messages, _) in &calls {
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].content, "How about candles?");
    }
}
