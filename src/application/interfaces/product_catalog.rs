use async_trait::async_trait;

use crate::domain::{DomainError, Product, ShoppingIntent};

/// Selects candidate products for an extracted intent.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_products(&self, intent: &ShoppingIntent) -> Result<Vec<Product>, DomainError>;
}
