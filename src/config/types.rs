//! Configuration types and structures.
//!
//! `Config` is the fully resolved configuration every other part of the
//! plugin reads. Partial user input lives in [`super::patch::ConfigPatch`];
//! this type is always complete and internally consistent.

use crate::search::FindCommand;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Fixed filetype identifier registered with the host editor.
pub const NOTES_FILETYPE: &str = "notevault";

/// The three kinds of notes that carry template bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Normal,
    Daily,
    Weekly,
}

/// Filename scheme for newly created notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewNoteFilename {
    /// Use the note title (default)
    #[default]
    Title,
    /// Use a generated timestamp id
    Uuid,
    /// Timestamp id, separator, then title
    UuidTitle,
    /// Title, separator, then timestamp id
    TitleUuid,
}

/// Link style for inserted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageLinkStyle {
    /// `![](path)` (default)
    #[default]
    Markdown,
    /// `![[path]]`
    Wiki,
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Filename,
    Modified,
}

/// How tags are written inside notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TagNotation {
    #[default]
    #[serde(rename = "#tag")]
    HashTag,
    #[serde(rename = ":tag:")]
    ColonTag,
    #[serde(rename = "yaml-bare")]
    YamlBare,
}

/// Placement policy for new notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewNoteLocation {
    /// Daily/weekly links go to their special directory, everything else to home (default)
    #[default]
    Smart,
    /// Always create in home
    PreferHome,
    /// Create next to the note the link came from
    SameAsCurrent,
}

/// Template selection policy when several templates could apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateHandling {
    /// Pick by note kind, fall back to the plain new-note template (default)
    #[default]
    Smart,
    /// Always use the plain new-note template
    PreferNewNote,
    /// Prompt the user
    AlwaysAsk,
}

/// Mark placement in the calendar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarMark {
    /// Marker on the left, fitted to the day cell (default)
    #[default]
    LeftFit,
    Left,
    Right,
}

/// Calendar widget options, a nested sub-configuration with its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Week-numbering mode (default: 4, ISO week numbers).
    #[serde(default = "default_weeknm")]
    pub weeknm: u8,

    /// 1 if weeks start on Monday, 0 for Sunday (default: 1).
    #[serde(default = "default_calendar_monday")]
    pub calendar_monday: u8,

    /// Mark placement for days that have notes (default: left-fit).
    #[serde(default)]
    pub calendar_mark: CalendarMark,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            weeknm: default_weeknm(),
            calendar_monday: default_calendar_monday(),
            calendar_mark: CalendarMark::default(),
        }
    }
}

fn default_weeknm() -> u8 {
    4
}

fn default_calendar_monday() -> u8 {
    1
}

/// A template assignment for one note kind.
///
/// `Disabled` stands in for "no template configured": downstream template
/// loading treats it exactly like a nonexistent file and silently produces
/// an empty note instead of erroring on a missing setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateBinding {
    Path(PathBuf),
    #[default]
    Disabled,
}

impl TemplateBinding {
    /// The configured template path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TemplateBinding::Path(p) => Some(p.as_path()),
            TemplateBinding::Disabled => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, TemplateBinding::Disabled)
    }

    /// Anchor a relative template path at `base`. Disabled stays disabled.
    pub fn resolved(&self, base: &Path) -> TemplateBinding {
        match self {
            TemplateBinding::Path(p) if !p.is_absolute() => TemplateBinding::Path(base.join(p)),
            other => other.clone(),
        }
    }
}

// Serialized as a plain string; empty string or null means disabled. This
// keeps the YAML/JSON shape flat while the in-memory form stays a tagged
// enum rather than a magic path value.
impl Serialize for TemplateBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TemplateBinding::Path(p) => serializer.serialize_str(&p.to_string_lossy()),
            TemplateBinding::Disabled => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for TemplateBinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw {
            None => TemplateBinding::Disabled,
            Some(s) if s.is_empty() => TemplateBinding::Disabled,
            Some(s) => TemplateBinding::Path(PathBuf::from(s)),
        })
    }
}

/// Template bindings per note kind. Always carries exactly the three kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteTypeTemplates {
    pub normal: TemplateBinding,
    pub daily: TemplateBinding,
    pub weekly: TemplateBinding,
}

impl NoteTypeTemplates {
    /// Get the binding for a note kind.
    pub fn get(&self, kind: NoteKind) -> &TemplateBinding {
        match kind {
            NoteKind::Normal => &self.normal,
            NoteKind::Daily => &self.daily,
            NoteKind::Weekly => &self.weekly,
        }
    }
}

/// Fully resolved plugin configuration.
///
/// Built by [`Config::with_home`](super::defaults), overlaid with a
/// [`ConfigPatch`](super::patch::ConfigPatch), then completed by
/// [`derive_all`](super::derive::derive_all). After that pipeline, `home` and
/// every special directory are absolute and `note_type_templates` mirrors the
/// three template fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Vault home directory. Anchors every relative path setting.
    pub home: PathBuf,

    /// Bind files under `home` matching `extension` to the notes filetype.
    #[serde(default = "default_true")]
    pub take_over_my_home: bool,

    /// Register the notes filetype with the host editor.
    #[serde(default = "default_true")]
    pub auto_set_filetype: bool,

    /// Directory for daily notes.
    pub dailies: PathBuf,

    /// Directory for weekly notes.
    pub weeklies: PathBuf,

    /// Directory holding note templates.
    pub templates: PathBuf,

    /// Subdirectory for pasted images, or `None` to store next to the note.
    #[serde(default)]
    pub image_subdir: Option<PathBuf>,

    /// Note file extension, including the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Filename scheme for new notes.
    #[serde(default)]
    pub new_note_filename: NewNoteFilename,

    /// strftime format for generated note ids.
    #[serde(default = "default_uuid_type")]
    pub uuid_type: String,

    /// Separator between id and title in combined filename schemes.
    #[serde(default = "default_uuid_sep")]
    pub uuid_sep: String,

    /// Replacement for spaces in filenames, or `None` to keep spaces.
    #[serde(default)]
    pub filename_space_subst: Option<String>,

    /// Following a link to a missing note creates it.
    #[serde(default = "default_true")]
    pub follow_creates_nonexisting: bool,

    /// Opening a missing daily note creates it.
    #[serde(default = "default_true")]
    pub dailies_create_nonexisting: bool,

    /// Opening a missing weekly note creates it.
    #[serde(default = "default_true")]
    pub weeklies_create_nonexisting: bool,

    /// Link style for inserted images.
    #[serde(default)]
    pub image_link_style: ImageLinkStyle,

    /// Sort order for note listings.
    #[serde(default)]
    pub sort: SortOrder,

    /// Include subdirectories when generating links.
    #[serde(default = "default_true")]
    pub subdirs_in_links: bool,

    /// Wire the calendar widget up to daily notes.
    #[serde(default = "default_true")]
    pub plug_into_calendar: bool,

    /// Calendar widget options.
    #[serde(default)]
    pub calendar_opts: CalendarConfig,

    /// How tags are written inside notes.
    #[serde(default)]
    pub tag_notation: TagNotation,

    /// Placement policy for new notes.
    #[serde(default)]
    pub new_note_location: NewNoteLocation,

    /// Template selection policy.
    #[serde(default)]
    pub template_handling: TemplateHandling,

    /// Renaming a note rewrites links that point at it.
    #[serde(default = "default_true")]
    pub rename_update_links: bool,

    /// Selecting a day in the calendar opens that day's daily note.
    #[serde(default)]
    pub journal_auto_open: bool,

    /// Template for plain new notes.
    #[serde(default)]
    pub template_new_note: TemplateBinding,

    /// Template for new daily notes.
    #[serde(default)]
    pub template_new_daily: TemplateBinding,

    /// Template for new weekly notes.
    #[serde(default)]
    pub template_new_weekly: TemplateBinding,

    /// Derived: template binding per note kind.
    #[serde(default)]
    pub note_type_templates: NoteTypeTemplates,

    /// Derived: file extensions included in note listings.
    #[serde(default)]
    pub filter_extensions: Vec<String>,

    /// Derived: accelerated file listing command, when the search tool is
    /// installed. `None` means no accelerated search is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub find_command: Option<FindCommand>,

    /// Derived: whether the search tool's PCRE mode is usable.
    #[serde(default)]
    pub rg_pcre: bool,
}

impl Config {
    /// Recompute `note_type_templates` from the three template fields.
    pub fn rebind_note_type_templates(&mut self) {
        self.note_type_templates = NoteTypeTemplates {
            normal: self.template_new_note.clone(),
            daily: self.template_new_daily.clone(),
            weekly: self.template_new_weekly.clone(),
        };
    }
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_extension() -> String {
    ".md".to_string()
}

pub(crate) fn default_uuid_type() -> String {
    "%Y%m%d%H%M".to_string()
}

pub(crate) fn default_uuid_sep() -> String {
    "-".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_binding_empty_string_is_disabled() {
        let binding: TemplateBinding = serde_yaml::from_str("\"\"").unwrap();
        assert!(binding.is_disabled());
    }

    #[test]
    fn test_template_binding_null_is_disabled() {
        let binding: TemplateBinding = serde_yaml::from_str("null").unwrap();
        assert!(binding.is_disabled());
    }

    #[test]
    fn test_template_binding_path_round_trip() {
        let binding = TemplateBinding::Path(PathBuf::from("/notes/templates/daily.md"));
        let yaml = serde_yaml::to_string(&binding).unwrap();
        let back: TemplateBinding = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(binding, back);
    }

    #[test]
    fn test_template_binding_resolved_keeps_absolute() {
        let binding = TemplateBinding::Path(PathBuf::from("/abs/t.md"));
        assert_eq!(binding.resolved(Path::new("/notes")), binding);

        let relative = TemplateBinding::Path(PathBuf::from("templates/t.md"));
        assert_eq!(
            relative.resolved(Path::new("/notes")),
            TemplateBinding::Path(PathBuf::from("/notes/templates/t.md"))
        );
    }

    #[test]
    fn test_note_type_templates_serializes_three_keys() {
        let templates = NoteTypeTemplates::default();
        let value = serde_json::to_value(&templates).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.contains_key("normal"));
        assert!(map.contains_key("daily"));
        assert!(map.contains_key("weekly"));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_yaml::to_string(&NewNoteFilename::UuidTitle).unwrap().trim(),
            "uuid-title"
        );
        assert_eq!(
            serde_yaml::to_string(&TagNotation::HashTag).unwrap().trim(),
            "'#tag'"
        );
        assert_eq!(
            serde_yaml::to_string(&CalendarMark::LeftFit).unwrap().trim(),
            "left-fit"
        );
        let parsed: NewNoteLocation = serde_yaml::from_str("prefer_home").unwrap();
        assert_eq!(parsed, NewNoteLocation::PreferHome);
    }
}
