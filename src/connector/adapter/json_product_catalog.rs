use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ProductCatalog;
use crate::domain::{DomainError, Product, ShoppingIntent};

pub const DEFAULT_LIMIT: usize = 5;

/// Read-only product catalog backed by a JSON array of products.
///
/// Selection is a plain filter: price inside the intent's range and, when
/// the intent names categories, a case-insensitive match on the product's
/// category or tags. Catalog order is preserved.
pub struct JsonProductCatalog {
    products: Vec<Product>,
    limit: usize,
}

impl JsonProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let products = parse_products(&raw)
            .map_err(|e| DomainError::parse(format!("{}: {e}", path.display())))?;
        debug!("Loaded {} products from {}", products.len(), path.display());
        Ok(Self::new(products))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn matches(product: &Product, intent: &ShoppingIntent) -> bool {
        if !intent.price_range.contains(product.price) {
            return false;
        }
        if intent.categories.is_empty() {
            return true;
        }

        let tags = product.tags.as_deref().unwrap_or_default();
        intent.categories.iter().any(|wanted| {
            let wanted = wanted.trim();
            product.category.eq_ignore_ascii_case(wanted)
                || tags.iter().any(|tag| tag.eq_ignore_ascii_case(wanted))
        })
    }
}

/// Parse a JSON array of catalog products.
pub fn parse_products(raw: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[async_trait]
impl ProductCatalog for JsonProductCatalog {
    async fn find_products(&self, intent: &ShoppingIntent) -> Result<Vec<Product>, DomainError> {
        let found: Vec<Product> = self
            .products
            .iter()
            .filter(|product| Self::matches(product, intent))
            .take(self.limit)
            .cloned()
            .collect();

        debug!(
            "Catalog matched {} of {} products (limit {})",
            found.len(),
            self.products.len(),
            self.limit
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::PriceRange;

    fn catalog() -> JsonProductCatalog {
        JsonProductCatalog::new(vec![
            Product::new("1", "Linen Apron", 29.0).with_category("Kitchen"),
            Product::new("2", "Cork Yoga Mat", 75.0)
                .with_category("fitness")
                .with_tags(vec!["eco_friendly".to_string(), "gifts".to_string()]),
            Product::new("3", "Espresso Machine", 450.0).with_category("kitchen"),
        ])
    }

    fn intent(categories: &[&str], min: f64, max: f64) -> ShoppingIntent {
        ShoppingIntent {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            price_range: PriceRange::new(min, max),
            ..ShoppingIntent::default()
        }
    }

    #[tokio::test]
    async fn filters_by_category_case_insensitively() {
        let found = catalog().find_products(&intent(&["KITCHEN"], 0.0, 1000.0)).await.unwrap();
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn matches_tags_as_categories() {
        let found = catalog().find_products(&intent(&["gifts"], 0.0, 1000.0)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cork Yoga Mat");
    }

    #[tokio::test]
    async fn filters_by_price_range() {
        let found = catalog().find_products(&intent(&[], 20.0, 80.0)).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.price <= 80.0));
    }

    #[tokio::test]
    async fn respects_limit() {
        let found = catalog()
            .with_limit(1)
            .find_products(&ShoppingIntent::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn loads_products_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"_id":"a1","name":"Desk Lamp","price":39.5,"features":["dimmable"]}}]"#
        )
        .unwrap();

        let catalog = JsonProductCatalog::from_file(file.path()).unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = JsonProductCatalog::from_file(file.path()).err().unwrap();

        assert!(err.is_parse_error());
    }
}
