//! Derived-field computation.
//!
//! Recomputes everything that depends on other settings after a merge. The
//! steps run in a fixed order and each one is idempotent, so the whole pass
//! can safely run again after any field changes.

use super::types::Config;
use crate::paths;
use crate::search::{FindCommand, SearchProbe};
use tracing::debug;

/// Fill in every derived field of a merged configuration.
///
/// Order matters: the extension filter feeds the find command, and the
/// directory fields must be resolved against the final `home`.
pub fn derive_all(config: &mut Config, search: &dyn SearchProbe) {
    // 1. Extension filter: an explicit override stands; otherwise listings
    //    include exactly the configured note extension.
    if config.filter_extensions.is_empty() {
        config.filter_extensions = vec![config.extension.clone()];
    }

    // 2-3. Template bindings: relative paths anchor at the templates
    //      directory once it is resolved below, disabled stays disabled,
    //      then the per-kind map is rebuilt from the three fields.
    paths::resolve_in_place(&mut config.templates, &config.home);
    config.template_new_note = config.template_new_note.resolved(&config.templates);
    config.template_new_daily = config.template_new_daily.resolved(&config.templates);
    config.template_new_weekly = config.template_new_weekly.resolved(&config.templates);
    config.rebind_note_type_templates();

    // 4. Special directories become absolute, anchored at home.
    paths::resolve_in_place(&mut config.dailies, &config.home);
    paths::resolve_in_place(&mut config.weeklies, &config.home);
    config.image_subdir = paths::resolve(config.image_subdir.as_deref(), &config.home);

    // 5-6. Fast-search detection. Absence is a normal outcome, not an error.
    match search.locate() {
        Some(program) => {
            config.rg_pcre = search.supports_pcre(&program);
            debug!(
                program = %program.display(),
                pcre = config.rg_pcre,
                "fast search available"
            );
            config.find_command = Some(FindCommand::files(&program, &config.filter_extensions));
        }
        None => {
            config.find_command = None;
            config.rg_pcre = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::patch::ConfigPatch;
    use crate::search::UnavailableSearch;
    use std::path::{Path, PathBuf};

    fn resolved(patch_yaml: &str) -> Config {
        let mut config = Config::with_home(Some("/notes"));
        let patch: ConfigPatch = serde_yaml::from_str(patch_yaml).unwrap();
        patch.apply(&mut config);
        derive_all(&mut config, &UnavailableSearch);
        config
    }

    #[test]
    fn test_filter_extensions_defaults_to_extension() {
        let config = resolved("{}");
        assert_eq!(config.filter_extensions, vec![".md".to_string()]);

        let config = resolved("extension: .markdown");
        assert_eq!(config.filter_extensions, vec![".markdown".to_string()]);
    }

    #[test]
    fn test_filter_extensions_override_stands() {
        let config = resolved("filter_extensions: [\".md\", \".txt\"]");
        assert_eq!(
            config.filter_extensions,
            vec![".md".to_string(), ".txt".to_string()]
        );
    }

    #[test]
    fn test_relative_dirs_anchored_at_home() {
        let config = resolved("dailies: journal\nimage_subdir: img");
        assert_eq!(config.dailies, PathBuf::from("/notes/journal"));
        assert_eq!(config.image_subdir, Some(PathBuf::from("/notes/img")));
    }

    #[test]
    fn test_absolute_dirs_untouched() {
        let config = resolved("weeklies: /elsewhere/weekly");
        assert_eq!(config.weeklies, PathBuf::from("/elsewhere/weekly"));
    }

    #[test]
    fn test_absent_image_subdir_stays_absent() {
        let config = resolved("{}");
        assert_eq!(config.image_subdir, None);
    }

    #[test]
    fn test_note_type_templates_recomputed() {
        let config = resolved("template_new_daily: /notes/templates/custom_daily.md");
        assert_eq!(
            config.note_type_templates.daily.path(),
            Some(Path::new("/notes/templates/custom_daily.md"))
        );
        // The untouched kinds keep the standard defaults
        assert_eq!(
            config.note_type_templates.normal.path(),
            Some(Path::new("/notes/templates/new_note.md"))
        );
    }

    #[test]
    fn test_disabled_template_stays_disabled() {
        let config = resolved("template_new_weekly: \"\"");
        assert!(config.note_type_templates.weekly.is_disabled());
        assert!(config.template_new_weekly.is_disabled());
    }

    #[test]
    fn test_no_search_tool_leaves_fields_unset() {
        let config = resolved("{}");
        assert_eq!(config.find_command, None);
        assert!(!config.rg_pcre);
    }

    #[test]
    fn test_derive_all_is_idempotent() {
        let mut config = Config::with_home(Some("/notes"));
        let patch: ConfigPatch =
            serde_yaml::from_str("dailies: journal\nimage_subdir: img").unwrap();
        patch.apply(&mut config);

        derive_all(&mut config, &UnavailableSearch);
        let once = config.clone();
        derive_all(&mut config, &UnavailableSearch);
        assert_eq!(config, once);
    }
}
