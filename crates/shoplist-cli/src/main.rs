use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use shoplist_cli::app::App;
use shoplist_cli::console::{StdioConsole, TerminalConsole};
use shoplist_core::{auth, storage, ConfigLoader, ShopConfig, StorageBackend};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "shoplist", author, version, about = "Shopping list manager")]
struct Cli {
    #[clap(long, short, help = "Configuration file (defaults to ./shoplist.yaml if present)")]
    config: Option<PathBuf>,

    #[clap(long, short, help = "Log level (overrides the configuration file)")]
    log_level: Option<String>,

    #[clap(long, help = "Log to stderr instead of the log file")]
    log_stderr: bool,

    #[clap(long, help = "Storage backend: file or remote")]
    storage: Option<String>,

    #[clap(long, help = "Data file for the file backend")]
    file: Option<PathBuf>,

    #[clap(long, help = "Base URL of the shopping list API")]
    api_url: Option<String>,
}

impl Cli {
    fn apply_to(&self, config: &mut ShopConfig) -> Result<()> {
        if let Some(backend) = &self.storage {
            config.storage.backend = backend.parse::<StorageBackend>()?;
        }
        if let Some(file) = &self.file {
            config.storage.path = file.clone();
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config.validate()?;
        Ok(())
    }
}

fn init_logging(config: &ShopConfig, to_stderr: bool) -> Result<()> {
    let level = config.logging.level.parse().unwrap_or(LevelFilter::Info);

    if to_stderr {
        env_logger::Builder::new().filter_level(level).init();
        return Ok(());
    }

    // The menu owns the terminal, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("Failed to open log file {}", config.logging.file.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::discover(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    cli.apply_to(&mut config)?;
    init_logging(&config, cli.log_stderr)?;

    log::info!("Starting shoplist with the {} backend", config.storage.backend);

    let store = storage::from_config(&config)?;
    let authenticator = auth::from_config(&config)?;

    if io::stdin().is_terminal() {
        let mut app = App::new(TerminalConsole::new(), store, authenticator, config.storage.backend)?;
        app.run().await
    } else {
        let console = StdioConsole::new(io::stdin().lock(), io::stdout());
        let mut app = App::new(console, store, authenticator, config.storage.backend)?;
        app.run().await
    }
}
