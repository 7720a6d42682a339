//! Treestore CLI - Query hierarchies stored as flat JSON records

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, query};
use config::Config;
use output::OutputFormat;
use treestore_core::{Item, TreeStore};

#[derive(Parser)]
#[command(name = "treestore")]
#[command(author, version, about = "Query parent/child hierarchies in flat JSON records")]
pub struct Cli {
    /// Records file: a JSON array of objects with `id` and `parent`
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format (default from config)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file
    #[arg(short, long, env = "TREESTORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::default_config_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Query(query::QueryCommands),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded store
pub struct AppContext {
    pub store: TreeStore,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load(&cli.config_path())?;

        let file = match cli.file.as_ref().or(config.default_file.as_ref()) {
            Some(file) => file.clone(),
            None => anyhow::bail!(
                "No records file given. Pass --file or run `treestore config set default_file <PATH>`."
            ),
        };

        let format = match cli.format {
            Some(format) => format,
            None => OutputFormat::parse(&config.format).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown format in config: {} (expected table or json)",
                    config.format
                )
            })?,
        };
        let store = load_store(&file)?;

        Ok(Self {
            store,
            config,
            format,
        })
    }
}

/// Read a JSON array of records and build the index
pub fn load_store(path: &Path) -> anyhow::Result<TreeStore> {
    tracing::debug!("Loading records from: {:?}", path);

    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let items: Vec<Item> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid records in {}: {}", path.display(), e))?;

    tracing::info!("Loaded {} records from {}", items.len(), path.display());
    Ok(TreeStore::new(items))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting treestore CLI");

    match &cli.command {
        Commands::Query(command) => {
            let ctx = AppContext::new(&cli)?;
            query::run(command, &ctx)?;
        }
        Commands::Config(args) => config_cmd::run(args, &cli)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
