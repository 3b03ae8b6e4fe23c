use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Inclusive price bounds. `min <= max` always holds for values built
/// through [`PriceRange::new`] or parsed via [`ShoppingIntent::from_json`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Build a range, swapping the bounds when given in the wrong order.
    /// Non-finite bounds yield the default range.
    pub fn new(min: f64, max: f64) -> Self {
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Build a range from bounds the model may have left out. A lone bound
    /// is kept as given and the missing one is widened to the default,
    /// never past the bound the user stated.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (Some(min), Some(max)) => Self::new(min, max),
            (Some(min), None) => Self::new(min, min.max(DEFAULT_MAX_PRICE)),
            (None, Some(max)) => Self::new(DEFAULT_MIN_PRICE.min(max), max),
            (None, None) => Self::default(),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// Structured shopping goals extracted from a free-text query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShoppingIntent {
    pub categories: Vec<String>,
    pub attributes: Vec<String>,
    pub price_range: PriceRange,
    pub occasion: String,
    pub style: String,
    pub use_case: String,
}

/// Lenient wire shape: the model may omit fields or send `null`.
#[derive(Deserialize)]
struct RawIntent {
    categories: Option<Vec<String>>,
    attributes: Option<Vec<String>>,
    price_range: Option<RawPriceRange>,
    occasion: Option<String>,
    style: Option<String>,
    use_case: Option<String>,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl From<RawIntent> for ShoppingIntent {
    fn from(raw: RawIntent) -> Self {
        let price_range = raw
            .price_range
            .map(|r| PriceRange::from_bounds(r.min, r.max))
            .unwrap_or_default();

        Self {
            categories: raw.categories.unwrap_or_default(),
            attributes: raw.attributes.unwrap_or_default(),
            price_range,
            occasion: raw.occasion.unwrap_or_default(),
            style: raw.style.unwrap_or_default(),
            use_case: raw.use_case.unwrap_or_default(),
        }
    }
}

impl ShoppingIntent {
    /// Parse model output into a fully populated intent.
    ///
    /// The content must be a JSON object; anything else is a
    /// [`DomainError::ParseError`].
    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        let value: serde_json::Value = serde_json::from_str(content.trim())
            .map_err(|e| DomainError::parse(format!("intent is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(DomainError::parse("intent is not a JSON object"));
        }
        let raw: RawIntent = serde_json::from_value(value)
            .map_err(|e| DomainError::parse(format!("intent has unexpected field types: {e}")))?;
        Ok(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.attributes.is_empty()
            && self.occasion.is_empty()
            && self.style.is_empty()
            && self.use_case.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intent_uses_default_price_range() {
        let intent = ShoppingIntent::default();
        assert!(intent.is_empty());
        assert_eq!(intent.price_range, PriceRange { min: 0.0, max: 1000.0 });
    }

    #[test]
    fn parses_full_intent() {
        let json = r#"{"categories":["gifts"],"attributes":["eco_friendly"],"price_range":{"min":10,"max":50},"occasion":"birthday","style":"modern","use_case":"gift for friend"}"#;
        let intent = ShoppingIntent::from_json(json).unwrap();

        assert_eq!(
            intent,
            ShoppingIntent {
                categories: vec!["gifts".to_string()],
                attributes: vec!["eco_friendly".to_string()],
                price_range: PriceRange { min: 10.0, max: 50.0 },
                occasion: "birthday".to_string(),
                style: "modern".to_string(),
                use_case: "gift for friend".to_string(),
            }
        );
    }

    #[test]
    fn missing_and_null_fields_take_defaults() {
        let intent = ShoppingIntent::from_json(r#"{"categories":["shoes"],"style":null}"#).unwrap();
        assert_eq!(intent.categories, vec!["shoes"]);
        assert_eq!(intent.style, "");
        assert_eq!(intent.price_range, PriceRange::default());
    }

    #[test]
    fn partial_price_range_fills_missing_bound() {
        let intent = ShoppingIntent::from_json(r#"{"price_range":{"max":80}}"#).unwrap();
        assert_eq!(intent.price_range, PriceRange { min: 0.0, max: 80.0 });
    }

    #[test]
    fn inverted_price_range_is_swapped() {
        let intent = ShoppingIntent::from_json(r#"{"price_range":{"min":200,"max":20}}"#).unwrap();
        assert_eq!(intent.price_range, PriceRange { min: 20.0, max: 200.0 });
        assert!(intent.price_range.min <= intent.price_range.max);
    }

    #[test]
    fn non_json_is_parse_error() {
        let err = ShoppingIntent::from_json("Sure! Here is the intent you asked for.").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn lone_minimum_is_kept() {
        let intent = ShoppingIntent::from_json(r#"{"price_range":{"min":2000}}"#).unwrap();
        assert_eq!(intent.price_range, PriceRange { min: 2000.0, max: 2000.0 });

        let intent = ShoppingIntent::from_json(r#"{"price_range":{"min":50,"max":null}}"#).unwrap();
        assert_eq!(intent.price_range, PriceRange { min: 50.0, max: 1000.0 });
    }

    #[test]
    fn json_array_is_parse_error() {
        assert!(ShoppingIntent::from_json("[1, 2, 3]").unwrap_err().is_parse_error());

        let shaped_like_fields = r#"[["shoes"],[],null,"x","y","z"]"#;
        assert!(ShoppingIntent::from_json(shaped_like_fields)
            .unwrap_err()
            .is_parse_error());
    }

    #[test]
    fn price_range_contains_is_inclusive() {
        let range = PriceRange::new(10.0, 50.0);
        assert!(range.contains(10.0));
        assert!(range.contains(50.0));
        assert!(!range.contains(50.01));
    }
}
