//! Error types for configuration resolution.
//!
//! Only structural problems are errors: no resolvable vault, a default vault
//! name that is not in the registry, or an unreadable override file. Soft
//! dependencies (missing templates, absent search tooling) are represented in
//! the configuration itself and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors. Setup aborts without publishing anything
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a top-level `home` nor a usable vault registry was supplied.
    #[error("no vault resolvable: supply `home` or a `vaults` registry with a `default` entry")]
    NoVaultResolvable,

    /// `default_vault` names an entry that is not in the registry.
    #[error("default_vault \"{name}\" is not present in the vault registry (known vaults: {known:?})")]
    UnknownVault { name: String, known: Vec<String> },

    /// An override file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An override file could not be parsed as YAML.
    #[error("failed to parse config file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
