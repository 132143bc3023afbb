//! notevault
//!
//! Command line front end for the vault configuration resolver: loads a
//! setup file, applies CLI and environment overrides, and prints the
//! resolved configuration or the vault registry.

use anyhow::Result;
use clap::Parser;
use notevault::cli::{Cli, Command, DumpFormat};
use notevault::config::SetupOptions;
use notevault::facade::ConfigContext;
use notevault::host::NullHost;
use notevault::search::SystemSearch;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Environment override for the vault home, applied between the setup file
/// and the CLI flags.
const HOME_ENV: &str = "NOTEVAULT_HOME";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Load the setup file, then layer environment and CLI overrides on top
    let mut options = match &cli.config {
        Some(path) => SetupOptions::from_file(Path::new(path))?,
        None => SetupOptions::default(),
    };
    if let Ok(home) = std::env::var(HOME_ENV)
        && !home.is_empty()
    {
        info!(home = %home, "vault home taken from {HOME_ENV}");
        options.overrides.home = Some(home);
    }
    if let Some(vault) = &cli.vault {
        options.default_vault = Some(vault.clone());
    }
    if let Some(home) = &cli.home {
        options.overrides.home = Some(home.clone());
    }
    if cli.debug {
        options.debug = true;
    }

    let context = ConfigContext::setup(&options, &SystemSearch, &NullHost)?;
    let state = context.active();

    let command = cli.command.unwrap_or(Command::Resolve {
        format: DumpFormat::Yaml,
    });
    match command {
        Command::Vaults => {
            for name in context.vault_names() {
                let marker = if name == state.active_vault { "*" } else { " " };
                let home = state
                    .registry
                    .get(&name)
                    .and_then(|patch| patch.home.as_deref())
                    .unwrap_or("(fallback)");
                println!("{marker} {name}\t{home}");
            }
        }
        Command::Resolve { format } => match format {
            DumpFormat::Yaml => print!("{}", serde_yaml::to_string(&state.config)?),
            DumpFormat::Json => println!("{}", serde_json::to_string_pretty(&state.config)?),
        },
    }

    Ok(())
}
