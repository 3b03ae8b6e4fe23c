use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::ShoppingIntent;

use super::super::Container;
use super::input::load_history;

pub struct AnalyzeController<'a> {
    container: &'a Container,
}

impl<'a> AnalyzeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn analyze(
        &self,
        query: String,
        history: Option<String>,
        format: OutputFormat,
    ) -> Result<String> {
        let history = load_history(history.as_deref())?;
        let outcome = self
            .container
            .analyze_use_case()
            .analyze(&query, &history)
            .await;

        if let Some(reason) = outcome.fallback_reason() {
            tracing::debug!("Intent fell back to defaults: {reason}");
        }

        let intent = outcome.into_inner();
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&intent)?),
            OutputFormat::Text => Ok(format_intent(&intent)),
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn format_intent(intent: &ShoppingIntent) -> String {
    format!(
        "Shopping Intent\n===============\nCategories:  {}\nAttributes:  {}\nPrice Range: ${} - ${}\nOccasion:    {}\nStyle:       {}\nUse Case:    {}",
        or_dash(&intent.categories.join(", ")),
        or_dash(&intent.attributes.join(", ")),
        intent.price_range.min,
        intent.price_range.max,
        or_dash(&intent.occasion),
        or_dash(&intent.style),
        or_dash(&intent.use_case),
    )
}
