use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AnalyzeController, AskController, RespondController};

pub struct Router<'a> {
    analyze_controller: AnalyzeController<'a>,
    respond_controller: RespondController<'a>,
    ask_controller: AskController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            analyze_controller: AnalyzeController::new(container),
            respond_controller: RespondController::new(container),
            ask_controller: AskController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Analyze {
                query,
                history,
                format,
            } => self.analyze_controller.analyze(query, history, format).await,
            Commands::Respond {
                query,
                products,
                history,
                format,
            } => {
                self.respond_controller
                    .respond(query, products, history, format)
                    .await
            }
            Commands::Ask {
                query,
                history,
                format,
            } => self.ask_controller.ask(query, history, format).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
