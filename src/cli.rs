//! CLI command definitions for notevault
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DumpFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Note vault configuration resolver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML setup file (vault registry or flat overrides)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Vault to activate (overrides the file's default_vault)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Vault home directory (single-vault shorthand, overrides config)
    #[arg(long, global = true)]
    pub home: Option<String>,

    /// Echo merge decisions and dump the resolved configuration
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and print the active configuration (default if no subcommand given)
    Resolve {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Yaml)]
        format: DumpFormat,
    },

    /// List the vault registry and the active vault
    Vaults,
}
