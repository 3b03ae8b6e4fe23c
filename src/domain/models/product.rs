use serde::{Deserialize, Deserializer, Serialize};

pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// A catalog product as supplied by the catalog collaborator.
///
/// Read-only from the assistant's point of view. Optional collections stay
/// `Option` so "absent" can be told apart from "empty" when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "any_number_as_count")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<ProductImage>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Catalog documents often carry `null` where a value was never set.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts may be stored as doubles (`12.0`); negatives clamp to zero.
fn any_number_as_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<f64>::deserialize(deserializer)?;
    Ok(count
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, f64::from(u32::MAX)) as u32))
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            rating: 0.0,
            review_count: None,
            category: String::new(),
            description: String::new(),
            features: None,
            images: None,
            tags: None,
        }
    }

    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = Some(review_count);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = Some(features);
        self
    }

    pub fn with_images(mut self, urls: Vec<String>) -> Self {
        self.images = Some(urls.into_iter().map(|url| ProductImage { url }).collect());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn review_count(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }

    /// URL of the first image, or the placeholder when there is no usable one.
    pub fn image_url(&self) -> &str {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .map(|image| image.url.as_str())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}

/// Client-facing projection of a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub image_url: String,
    pub features: Vec<String>,
    pub tags: Vec<String>,
}

impl From<&Product> for FormattedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.clone(),
            rating: product.rating,
            review_count: product.review_count(),
            image_url: product.image_url().to_string(),
            features: product.features.clone().unwrap_or_default(),
            tags: product.tags.clone().unwrap_or_default(),
        }
    }
}

/// Shape products for the client. Pure and total: one output per input.
pub fn format_products(products: &[Product]) -> Vec<FormattedProduct> {
    products.iter().map(FormattedProduct::from).collect()
}
