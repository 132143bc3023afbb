//! Host editor integration seam.
//!
//! Setup has three side effects on the hosting editor: registering the note
//! filetype, claiming files under the vault home, and initializing the
//! calendar integration. Each effect carries a typed payload so hosts apply
//! them however suits their API; nothing here shells out or evaluates host
//! script.

use crate::config::types::{CalendarMark, Config, NOTES_FILETYPE};
use std::path::PathBuf;

/// Ask the host to treat an extension as a dedicated filetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiletypeRegistration {
    pub extension: String,
    pub filetype: String,
}

/// Ask the host to open files under `home` with the matching extensions as
/// notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeClaim {
    pub home: PathBuf,
    pub extensions: Vec<String>,
    pub filetype: String,
}

/// Hand the host's calendar everything it needs to render and link journal
/// notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInit {
    pub dailies: PathBuf,
    pub weeklies: PathBuf,
    pub extension: String,
    pub weeknm: u8,
    pub calendar_monday: u8,
    pub calendar_mark: CalendarMark,
}

/// The editor hosting the plugin. Implementations decide what each effect
/// means; the resolution pipeline only decides whether to request it.
pub trait Host {
    fn register_filetype(&self, registration: FiletypeRegistration);
    fn claim_home_files(&self, claim: HomeClaim);
    fn init_calendar(&self, init: CalendarInit);
}

/// Build the effect payloads a resolved configuration asks for, honoring the
/// behavioral switches. Runs on every publish, initial setup and reload
/// alike.
pub fn apply_effects(config: &Config, host: &dyn Host) {
    if config.auto_set_filetype {
        host.register_filetype(FiletypeRegistration {
            extension: config.extension.clone(),
            filetype: NOTES_FILETYPE.to_string(),
        });
    }

    if config.take_over_my_home {
        host.claim_home_files(HomeClaim {
            home: config.home.clone(),
            extensions: config.filter_extensions.clone(),
            filetype: NOTES_FILETYPE.to_string(),
        });
    }

    if config.plug_into_calendar {
        host.init_calendar(CalendarInit {
            dailies: config.dailies.clone(),
            weeklies: config.weeklies.clone(),
            extension: config.extension.clone(),
            weeknm: config.calendar_opts.weeknm,
            calendar_monday: config.calendar_opts.calendar_monday,
            calendar_mark: config.calendar_opts.calendar_mark,
        });
    }
}

/// A host that ignores every effect. Useful for resolution-only callers
/// such as the command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn register_filetype(&self, _registration: FiletypeRegistration) {}
    fn claim_home_files(&self, _claim: HomeClaim) {}
    fn init_calendar(&self, _init: CalendarInit) {}
}

/// One recorded host effect, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    Filetype(FiletypeRegistration),
    Claim(HomeClaim),
    Calendar(CalendarInit),
}

/// Test host that records every effect it receives.
#[derive(Debug, Default)]
pub struct RecordingHost {
    effects: std::sync::Mutex<Vec<HostEffect>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> Vec<HostEffect> {
        self.effects.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    fn register_filetype(&self, registration: FiletypeRegistration) {
        self.effects
            .lock()
            .unwrap()
            .push(HostEffect::Filetype(registration));
    }

    fn claim_home_files(&self, claim: HomeClaim) {
        self.effects.lock().unwrap().push(HostEffect::Claim(claim));
    }

    fn init_calendar(&self, init: CalendarInit) {
        self.effects.lock().unwrap().push(HostEffect::Calendar(init));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::derive::derive_all;
    use crate::search::UnavailableSearch;

    fn resolved_config() -> Config {
        let mut config = Config::with_home(Some("/notes"));
        derive_all(&mut config, &UnavailableSearch);
        config
    }

    #[test]
    fn test_default_config_requests_all_effects() {
        let config = resolved_config();
        let host = RecordingHost::new();
        apply_effects(&config, &host);

        let effects = host.effects();
        assert_eq!(effects.len(), 3);
        assert!(matches!(&effects[0], HostEffect::Filetype(r) if r.filetype == NOTES_FILETYPE));
        assert!(matches!(&effects[1], HostEffect::Claim(c) if c.home == PathBuf::from("/notes")));
        assert!(
            matches!(&effects[2], HostEffect::Calendar(c) if c.dailies == PathBuf::from("/notes/daily"))
        );
    }

    #[test]
    fn test_switched_off_effects_skipped() {
        let mut config = resolved_config();
        config.auto_set_filetype = false;
        config.plug_into_calendar = false;

        let host = RecordingHost::new();
        apply_effects(&config, &host);

        let effects = host.effects();
        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], HostEffect::Claim(_)));
    }

    #[test]
    fn test_claim_carries_filter_extensions() {
        let mut config = resolved_config();
        config.filter_extensions = vec![".md".to_string(), ".txt".to_string()];

        let host = RecordingHost::new();
        apply_effects(&config, &host);

        match &host.effects()[1] {
            HostEffect::Claim(claim) => {
                assert_eq!(claim.extensions, vec![".md".to_string(), ".txt".to_string()]);
            }
            other => panic!("expected a home claim, got {other:?}"),
        }
    }
}
