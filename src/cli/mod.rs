use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a structured shopping intent from a query
    Analyze {
        query: String,

        /// JSON file with prior conversation messages ([{"role","content"}])
        #[arg(long)]
        history: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write a recommendation for a query and a given list of products
    Respond {
        query: String,

        /// JSON file holding the candidate products
        #[arg(short, long)]
        products: String,

        #[arg(long)]
        history: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Run a full assistant turn against the configured catalog
    Ask {
        query: String,

        #[arg(long)]
        history: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Start the HTTP API
    Serve {
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
