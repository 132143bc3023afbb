//! Vault registry and selection.
//!
//! A setup invocation may describe several named vaults, each an independent
//! note collection with its own partial configuration. Exactly one of them
//! becomes active; the rest stay in the registry for later switching.

use super::derive::derive_all;
use super::patch::ConfigPatch;
use super::types::Config;
use crate::error::{ConfigError, ConfigResult};
use crate::search::SearchProbe;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Conventional registry key used when no explicit default vault is named.
pub const DEFAULT_VAULT_KEY: &str = "default";

/// The override object accepted by setup.
///
/// Either a flat single-vault configuration (`home` plus any overrides), or
/// a `vaults` registry with an optional `default_vault` selector. The
/// routing keys (`vaults`, `default_vault`, `debug`) never leak into vault
/// configurations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupOptions {
    /// Named vault registry.
    #[serde(default)]
    pub vaults: Option<BTreeMap<String, ConfigPatch>>,

    /// Name of the registry entry to activate.
    #[serde(default)]
    pub default_vault: Option<String>,

    /// Echo merge decisions and dump the resolved configuration.
    #[serde(default)]
    pub debug: bool,

    /// Single-vault shorthand: overrides applied directly.
    #[serde(flatten)]
    pub overrides: ConfigPatch,
}

impl SetupOptions {
    /// Load setup options from a YAML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Outcome of vault selection: the full registry plus the overrides of the
/// one vault that becomes active.
#[derive(Debug, Clone)]
pub struct VaultSelection {
    pub registry: BTreeMap<String, ConfigPatch>,
    pub active_name: String,
    pub active: ConfigPatch,
}

/// Pick the active vault from raw setup input.
///
/// Decision order, first match wins:
/// 1. registry + explicit `default_vault` naming an entry
/// 2. registry containing a conventional `"default"` entry
/// 3. single-vault shorthand: top-level `home` present
///
/// Anything else is a configuration error; no half-built selection is ever
/// returned. Runs before the defaults factory, which needs the active
/// vault's home.
pub fn select(options: &SetupOptions) -> ConfigResult<VaultSelection> {
    if let Some(registry) = &options.vaults {
        if let Some(name) = &options.default_vault {
            let active = registry
                .get(name)
                .ok_or_else(|| ConfigError::UnknownVault {
                    name: name.clone(),
                    known: registry.keys().cloned().collect(),
                })?
                .clone();
            debug!(vault = %name, "explicit default vault selected");
            return Ok(VaultSelection {
                registry: registry.clone(),
                active_name: name.clone(),
                active,
            });
        }

        if let Some(active) = registry.get(DEFAULT_VAULT_KEY) {
            debug!(vault = DEFAULT_VAULT_KEY, "conventional default vault selected");
            return Ok(VaultSelection {
                registry: registry.clone(),
                active_name: DEFAULT_VAULT_KEY.to_string(),
                active: active.clone(),
            });
        }
    }

    if options.overrides.home.is_some() {
        debug!("single-vault shorthand selected");
        let active = options.overrides.clone();
        let mut registry = BTreeMap::new();
        registry.insert(DEFAULT_VAULT_KEY.to_string(), active.clone());
        return Ok(VaultSelection {
            registry,
            active_name: DEFAULT_VAULT_KEY.to_string(),
            active,
        });
    }

    Err(ConfigError::NoVaultResolvable)
}

/// A fully resolved setup: the active configuration plus the vault registry
/// it was chosen from.
#[derive(Debug, Clone)]
pub struct ResolvedSetup {
    pub active_vault: String,
    pub config: Config,
    pub registry: BTreeMap<String, ConfigPatch>,
}

/// Run the whole resolution pipeline: select a vault, build defaults seeded
/// by its home, overlay its overrides, and fill in derived fields.
pub fn resolve(options: &SetupOptions, search: &dyn SearchProbe) -> ConfigResult<ResolvedSetup> {
    let selection = select(options)?;

    let mut config = Config::with_home(selection.active.home.as_deref());
    selection.active.apply(&mut config);
    derive_all(&mut config, search);

    Ok(ResolvedSetup {
        active_vault: selection.active_name,
        config,
        registry: selection.registry,
    })
}
