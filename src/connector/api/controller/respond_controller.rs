use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::FormattedProduct;

use super::super::Container;
use super::input::{load_history, load_products};

pub struct RespondController<'a> {
    container: &'a Container,
}

impl<'a> RespondController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn respond(
        &self,
        query: String,
        products_path: String,
        history: Option<String>,
        format: OutputFormat,
    ) -> Result<String> {
        let history = load_history(history.as_deref())?;
        let products = load_products(&products_path)?;

        let response = self
            .container
            .generate_use_case()
            .generate(&query, &products, &history)
            .await
            .into_inner();

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&response)?),
            OutputFormat::Text => Ok(format_reply(&response.text, &response.products)),
        }
    }
}

/// Render assistant text followed by a numbered product list.
pub fn format_reply(text: &str, products: &[FormattedProduct]) -> String {
    let mut output = format!("{text}\n");

    if !products.is_empty() {
        output.push_str(&format!("\nProducts ({}):\n", products.len()));
        for (i, product) in products.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} - ${} ({}/5, {} reviews)\n   {}\n",
                i + 1,
                product.name,
                product.price,
                product.rating,
                product.review_count,
                product.image_url
            ));
        }
    }

    output
}
