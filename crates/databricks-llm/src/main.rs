//! databricks-llm CLI - send prompts to a Databricks model-serving endpoint.
//!
//! Serving endpoints speak the OpenAI Chat Completions protocol. The endpoint
//! URL and API key come from flags, the config file, or the
//! `DATABRICKS_API_BASE` / `DATABRICKS_API_KEY` environment variables, in
//! that order.
//!
//! # Usage
//!
//! ```bash
//! # Complete a prompt with the configured endpoint
//! databricks-llm complete "Explain the importance of open source LLMs"
//!
//! # Override the model and pass extra request parameters
//! databricks-llm complete "Hi" --model databricks-dbrx-instruct --option top_p=0.9
//!
//! # View configuration
//! databricks-llm config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// databricks-llm - Chat completions against Databricks serving endpoints.
#[derive(Parser, Debug)]
#[command(name = "databricks-llm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a prompt and print the completion
    Complete(cli::complete::CompleteArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match databricks_llm_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `databricks-llm config path`."
            );
            databricks_llm_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("databricks-llm v{}", databricks_llm_core::VERSION);

    match cli.command {
        Commands::Complete(args) => cli::complete::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
