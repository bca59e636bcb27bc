//! Keyshelf command-line interface.

pub mod commands;
pub mod import;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use keyshelf_core::env::vars;
use keyshelf_core::{BackendKind, Config};
use keyshelf_store::{CredentialStore, MemoryBackend};
use tracing::debug;

/// Keyshelf - named credentials in the OS credential store
#[derive(Parser)]
#[command(name = "keyshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ~/.keyshelf/keyshelf.json5)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Credential backend (keychain, memory)
    #[arg(long, env = vars::BACKEND, global = true)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List stored credentials (values masked)
    List,

    /// Print a stored credential
    Get {
        /// Credential name
        name: String,
    },

    /// Store a credential
    Store {
        /// Credential name
        name: String,

        /// Value to store (if omitted, prompts for hidden input)
        #[arg(long)]
        value: Option<String>,
    },

    /// Store credentials from a file of NAME = "value" lines
    StoreFile {
        /// Path to the credentials file
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Show version information
    Version,
}

/// Resolved configuration plus the store every command talks to.
pub struct Context {
    pub config: Config,
    pub store: CredentialStore,
}

impl Context {
    /// Load configuration and open the selected backend.
    pub fn load(config_path: Option<PathBuf>, backend: Option<BackendKind>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load_or_default().context("failed to load config")?,
        };

        let backend = backend.unwrap_or(config.backend);
        debug!(%backend, "opening credential store");
        let store = match backend {
            BackendKind::Keychain => CredentialStore::keychain(),
            BackendKind::Memory => CredentialStore::new(Arc::new(MemoryBackend::new())),
        };

        Ok(Self { config, store })
    }
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        backend,
        command,
        ..
    } = cli;
    let load = move || Context::load(config, backend);

    match command {
        Commands::Version => {
            println!("keyshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::List => commands::list::run(&load()?).await,
        Commands::Get { name } => commands::get::run(&load()?, &name).await,
        Commands::Store { name, value } => commands::store::run(&load()?, &name, value).await,
        Commands::StoreFile { path, yes } => commands::store_file::run(&load()?, &path, yes).await,
        Commands::Serve(args) => commands::serve::run(&load()?, args).await,
    }
}
