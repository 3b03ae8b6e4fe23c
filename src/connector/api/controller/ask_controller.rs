use anyhow::Result;

use crate::cli::OutputFormat;

use super::super::Container;
use super::input::load_history;
use super::respond_controller::format_reply;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(
        &self,
        query: String,
        history: Option<String>,
        format: OutputFormat,
    ) -> Result<String> {
        let history = load_history(history.as_deref())?;
        let reply = self
            .container
            .assistant_use_case()
            .assist(&query, &history)
            .await?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&reply)?),
            OutputFormat::Text => Ok(format_reply(&reply.text, &reply.products)),
        }
    }
}
