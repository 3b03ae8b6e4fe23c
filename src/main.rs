use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use shopping_assistant::connector::adapter::DEFAULT_LIMIT;
use shopping_assistant::connector::api::{Container, ContainerConfig, Router};
use shopping_assistant::connector::http;
use shopping_assistant::Commands;

#[derive(Parser)]
#[command(name = "shopping-assistant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from an offline scripted model instead of the chat completion API
    #[arg(long, global = true)]
    mock_llm: bool,

    /// JSON file with the product catalog used by `ask` and `serve`
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Maximum number of catalog products handed to response generation
    #[arg(long, global = true, default_value_t = DEFAULT_LIMIT)]
    catalog_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {e}"),
    }

    let container = Container::new(ContainerConfig {
        mock_llm: cli.mock_llm,
        catalog_path: cli.catalog,
        catalog_limit: cli.catalog_limit,
    })?;

    if let Commands::Serve { port, public } = cli.command {
        return http::serve(Arc::new(container), port, public).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{output}");

    Ok(())
}
