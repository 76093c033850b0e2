//! The `databricks-llm config` command for configuration management.

use clap::{Args, Subcommand};
use databricks_llm_core::{Config, API_BASE_ENV, API_KEY_ENV};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", config.to_toml()?);

            // Show where empty credentials will come from, never the values
            for (setting, value, env_var) in [
                ("api_key", &config.databricks.api_key, API_KEY_ENV),
                ("api_base", &config.databricks.api_base, API_BASE_ENV),
            ] {
                if value.is_empty() {
                    let state = if std::env::var_os(env_var).is_some() {
                        "set"
                    } else {
                        "unset"
                    };
                    println!("# {setting}: falls back to {env_var} ({state})");
                }
            }
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
