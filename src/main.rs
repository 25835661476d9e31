use anyhow::Result;
use clap::{Parser, Subcommand};
use fxboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxboard::AppCommand {
    fn from(cmd: Commands) -> fxboard::AppCommand {
        match cmd {
            Commands::Board { row } => fxboard::AppCommand::Board { rows: row },
            Commands::Rates => fxboard::AppCommand::Rates,
            Commands::Refresh => fxboard::AppCommand::Refresh,
            Commands::Convert { amount, code } => fxboard::AppCommand::Convert { amount, code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the conversion board
    Board {
        /// Board rows as CODE or CODE=AMOUNT, e.g. --row EUR=100
        #[arg(short, long)]
        row: Vec<String>,
    },
    /// Display exchange rates for all known currencies
    Rates,
    /// Refresh exchange rates from the configured sources
    Refresh,
    /// Convert an amount of a currency to USD
    Convert { amount: f64, code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
        // Bare invocation shows the board with its default rows
        None => {
            fxboard::run_command(
                fxboard::AppCommand::Board { rows: Vec::new() },
                cli.config_path.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxboard::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  open_er_api:
    base_url: "https://open.er-api.com"
  relay:
    base_url: "https://api.allorigins.win"
    target_url: "https://api.exchangerate-api.com/v4/latest/USD"
  frankfurter:
    base_url: "https://api.frankfurter.dev"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
