use anyhow::{Context, Result};

use crate::connector::adapter::parse_products;
use crate::domain::{ConversationMessage, Product};

/// Read prior conversation turns from a JSON file, or none when no file is given.
pub fn load_history(path: Option<&str>) -> Result<Vec<ConversationMessage>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid history file {path}"))
}

pub fn load_products(path: &str) -> Result<Vec<Product>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read products file {path}"))?;
    parse_products(&raw).with_context(|| format!("invalid products file {path}"))
}
