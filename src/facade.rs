//! Published active configuration.
//!
//! [`ConfigContext`] is the single entry point collaborators read settings
//! through. The resolved setup is published atomically: readers always see
//! either the prior complete state or the new complete state, never a
//! half-merged object, and a failed reload leaves the prior state in place.

use crate::config::types::Config;
use crate::config::vaults::{self, ResolvedSetup, SetupOptions};
use crate::error::{ConfigError, ConfigResult};
use crate::host::{self, Host};
use crate::search::SearchProbe;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Caller-held handle to the active resolved configuration.
#[derive(Debug)]
pub struct ConfigContext {
    current: ArcSwap<ResolvedSetup>,
}

impl ConfigContext {
    /// Resolve the given setup input and publish it as the initial state.
    ///
    /// Host effects run once the resolution has fully succeeded.
    pub fn setup(
        options: &SetupOptions,
        search: &dyn SearchProbe,
        host: &dyn Host,
    ) -> ConfigResult<Self> {
        let resolved = vaults::resolve(options, search)?;
        publish_effects(&resolved, options.debug, host);
        Ok(Self {
            current: ArcSwap::from_pointee(resolved),
        })
    }

    /// Re-run resolution with new input and swap the published state.
    ///
    /// The new state is built completely before the single `store`; any
    /// error leaves the prior state untouched and still visible to readers.
    pub fn reload(
        &self,
        options: &SetupOptions,
        search: &dyn SearchProbe,
        host: &dyn Host,
    ) -> ConfigResult<()> {
        let resolved = vaults::resolve(options, search)?;
        publish_effects(&resolved, options.debug, host);
        self.current.store(Arc::new(resolved));
        Ok(())
    }

    /// Activate a different vault from the published registry.
    pub fn switch_vault(
        &self,
        name: &str,
        search: &dyn SearchProbe,
        host: &dyn Host,
    ) -> ConfigResult<()> {
        let prior = self.current.load();
        let patch = prior
            .registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownVault {
                name: name.to_string(),
                known: prior.registry.keys().cloned().collect(),
            })?;

        let mut config = Config::with_home(patch.home.as_deref());
        patch.apply(&mut config);
        crate::config::derive::derive_all(&mut config, search);
        host::apply_effects(&config, host);

        self.current.store(Arc::new(ResolvedSetup {
            active_vault: name.to_string(),
            config,
            registry: prior.registry.clone(),
        }));
        Ok(())
    }

    /// Snapshot of the currently published state.
    pub fn active(&self) -> Arc<ResolvedSetup> {
        self.current.load_full()
    }

    /// Name of the currently active vault.
    pub fn active_vault(&self) -> String {
        self.current.load().active_vault.clone()
    }

    /// Registry vault names, sorted.
    pub fn vault_names(&self) -> Vec<String> {
        self.current.load().registry.keys().cloned().collect()
    }
}

fn publish_effects(resolved: &ResolvedSetup, debug: bool, host: &dyn Host) {
    if debug {
        match serde_json::to_string_pretty(&resolved.config) {
            Ok(dump) => info!(vault = %resolved.active_vault, "resolved configuration:\n{dump}"),
            Err(e) => info!(error = %e, "resolved configuration not serializable"),
        }
    }
    host::apply_effects(&resolved.config, host);
}
