//! Built-in defaults.
//!
//! [`Config::with_home`] produces the complete default configuration for a
//! vault, with every special directory and template binding anchored at the
//! vault's home. Merging overlays onto this output, never onto a partial
//! object.

use super::types::{
    CalendarConfig, Config, ImageLinkStyle, NewNoteFilename, NewNoteLocation, NoteTypeTemplates,
    SortOrder, TagNotation, TemplateBinding, TemplateHandling, default_extension,
    default_uuid_sep, default_uuid_type,
};
use crate::paths;
use std::path::PathBuf;

/// Vault directory used when no home is configured, relative to the user's
/// home directory.
pub const FALLBACK_VAULT_DIR: &str = "zettelkasten";

/// Conventional subdirectory names under the vault home.
pub const DAILIES_DIR: &str = "daily";
pub const WEEKLIES_DIR: &str = "weekly";
pub const TEMPLATES_DIR: &str = "templates";

/// Expand a possibly-shorthand home path (`~/...`) into an absolute one.
/// `None` falls back to `~/zettelkasten`.
pub fn resolve_home(home: Option<&str>) -> PathBuf {
    match home {
        Some(raw) => paths::absolutize(paths::expand_home(raw)),
        None => paths::absolutize(paths::expand_home(&format!("~/{FALLBACK_VAULT_DIR}"))),
    }
}

impl Config {
    /// Build the complete default configuration for a vault home.
    ///
    /// Must run before any merge step; the merger overlays user input onto
    /// this object field by field.
    pub fn with_home(home: Option<&str>) -> Self {
        let home = resolve_home(home);
        let dailies = home.join(DAILIES_DIR);
        let weeklies = home.join(WEEKLIES_DIR);
        let templates = home.join(TEMPLATES_DIR);

        let mut config = Self {
            home,
            take_over_my_home: true,
            auto_set_filetype: true,
            dailies,
            weeklies,
            template_new_note: TemplateBinding::Path(templates.join("new_note.md")),
            template_new_daily: TemplateBinding::Path(templates.join("new_daily.md")),
            template_new_weekly: TemplateBinding::Path(templates.join("new_weekly.md")),
            templates,
            image_subdir: None,
            extension: default_extension(),
            new_note_filename: NewNoteFilename::Title,
            uuid_type: default_uuid_type(),
            uuid_sep: default_uuid_sep(),
            filename_space_subst: None,
            follow_creates_nonexisting: true,
            dailies_create_nonexisting: true,
            weeklies_create_nonexisting: true,
            image_link_style: ImageLinkStyle::Markdown,
            sort: SortOrder::Filename,
            subdirs_in_links: true,
            plug_into_calendar: true,
            calendar_opts: CalendarConfig::default(),
            tag_notation: TagNotation::HashTag,
            new_note_location: NewNoteLocation::Smart,
            template_handling: TemplateHandling::Smart,
            rename_update_links: true,
            journal_auto_open: false,
            note_type_templates: NoteTypeTemplates::default(),
            filter_extensions: Vec::new(),
            find_command: None,
            rg_pcre: false,
        };
        config.rebind_note_type_templates();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CalendarMark;

    #[test]
    fn test_special_dirs_start_with_home() {
        let config = Config::with_home(Some("/notes"));
        assert_eq!(config.home, PathBuf::from("/notes"));
        assert!(config.dailies.starts_with(&config.home));
        assert!(config.weeklies.starts_with(&config.home));
        assert!(config.templates.starts_with(&config.home));
        assert_eq!(config.dailies, PathBuf::from("/notes/daily"));
    }

    #[test]
    fn test_documented_defaults() {
        let config = Config::with_home(Some("/notes"));
        assert!(config.take_over_my_home);
        assert!(config.auto_set_filetype);
        assert_eq!(config.extension, ".md");
        assert_eq!(config.new_note_filename, NewNoteFilename::Title);
        assert_eq!(config.uuid_type, "%Y%m%d%H%M");
        assert_eq!(config.uuid_sep, "-");
        assert_eq!(config.image_link_style, ImageLinkStyle::Markdown);
        assert_eq!(config.sort, SortOrder::Filename);
        assert!(config.subdirs_in_links);
        assert!(config.plug_into_calendar);
        assert_eq!(config.tag_notation, TagNotation::HashTag);
        assert_eq!(config.new_note_location, NewNoteLocation::Smart);
        assert_eq!(config.template_handling, TemplateHandling::Smart);
        assert!(config.rename_update_links);
        assert_eq!(config.calendar_opts.weeknm, 4);
        assert_eq!(config.calendar_opts.calendar_monday, 1);
        assert_eq!(config.calendar_opts.calendar_mark, CalendarMark::LeftFit);
    }

    #[test]
    fn test_note_type_templates_computed_at_build() {
        let config = Config::with_home(Some("/notes"));
        assert_eq!(config.note_type_templates.normal, config.template_new_note);
        assert_eq!(config.note_type_templates.daily, config.template_new_daily);
        assert_eq!(
            config.note_type_templates.normal.path().unwrap(),
            PathBuf::from("/notes/templates/new_note.md")
        );
    }

    #[test]
    fn test_missing_home_uses_fallback() {
        let config = Config::with_home(None);
        assert!(config.home.is_absolute());
        assert!(config.home.ends_with(FALLBACK_VAULT_DIR));
    }

    #[test]
    fn test_shorthand_home_expanded() {
        let config = Config::with_home(Some("~/notes"));
        assert!(config.home.is_absolute());
        assert!(!config.home.to_string_lossy().contains('~'));
    }
}
