//! Partial configuration overlays.
//!
//! `ConfigPatch` is the shape of user-supplied input: every field optional,
//! absent meaning "keep the current value". Present fields replace the base
//! value unconditionally, so an explicit `false` or empty string is honored
//! rather than treated as unset. The nested calendar options are the one
//! exception: they merge per field instead of replacing wholesale, so a
//! patch carrying only `weeknm` does not wipe the other calendar settings.

use super::defaults;
use super::types::{
    CalendarConfig, CalendarMark, Config, ImageLinkStyle, NewNoteFilename, NewNoteLocation,
    SortOrder, TagNotation, TemplateBinding, TemplateHandling,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Deserialize a field so that an explicit `null` is distinguishable from an
/// absent key: absent stays `None`, `null` becomes `Some(None)`.
fn explicit<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a template override. `null` and `""` both mean "explicitly
/// disabled", which is distinct from the key being absent.
fn explicit_binding<'de, D>(deserializer: D) -> Result<Option<TemplateBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    TemplateBinding::deserialize(deserializer).map(Some)
}

/// Per-field overlay onto the calendar sub-configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeknm: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_monday: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_mark: Option<CalendarMark>,
}

impl CalendarPatch {
    /// First-non-nil-wins per field: override value, else the prior resolved
    /// value (which itself started from the documented defaults).
    pub fn apply(&self, base: &mut CalendarConfig) {
        if let Some(weeknm) = self.weeknm {
            debug!(key = "calendar_opts.weeknm", old = base.weeknm, new = weeknm, "override");
            base.weeknm = weeknm;
        }
        if let Some(monday) = self.calendar_monday {
            debug!(
                key = "calendar_opts.calendar_monday",
                old = base.calendar_monday,
                new = monday,
                "override"
            );
            base.calendar_monday = monday;
        }
        if let Some(mark) = self.calendar_mark {
            debug!(
                key = "calendar_opts.calendar_mark",
                old = ?base.calendar_mark,
                new = ?mark,
                "override"
            );
            base.calendar_mark = mark;
        }
    }
}

macro_rules! overlay {
    ($base:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field.clone() {
                debug!(
                    key = stringify!($field),
                    old = ?$base.$field,
                    new = ?value,
                    "override"
                );
                $base.$field = value;
            }
        )+
    };
}

/// A partial user configuration, overlaid onto a complete base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    /// Vault home, possibly in `~/` shorthand form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_over_my_home: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_set_filetype: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dailies: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeklies: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_subdir: Option<Option<PathBuf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_note_filename: Option<NewNoteFilename>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid_sep: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename_space_subst: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_creates_nonexisting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dailies_create_nonexisting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeklies_create_nonexisting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link_style: Option<ImageLinkStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdirs_in_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plug_into_calendar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_opts: Option<CalendarPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_notation: Option<TagNotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_note_location: Option<NewNoteLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_handling: Option<TemplateHandling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_update_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_auto_open: Option<bool>,
    #[serde(
        default,
        deserialize_with = "explicit_binding",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_new_note: Option<TemplateBinding>,
    #[serde(
        default,
        deserialize_with = "explicit_binding",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_new_daily: Option<TemplateBinding>,
    #[serde(
        default,
        deserialize_with = "explicit_binding",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_new_weekly: Option<TemplateBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_extensions: Option<Vec<String>>,
}

impl ConfigPatch {
    /// Overlay this patch onto a complete base configuration.
    ///
    /// Every present field replaces the base value. A `home` supplied here
    /// goes through the same shorthand expansion as a factory-time home;
    /// dependent fields are re-anchored afterwards by the derive pass.
    pub fn apply(&self, base: &mut Config) {
        if let Some(raw) = &self.home {
            let home = defaults::resolve_home(Some(raw));
            debug!(key = "home", old = ?base.home, new = ?home, "override");
            base.home = home;
        }

        overlay!(
            base,
            self,
            take_over_my_home,
            auto_set_filetype,
            dailies,
            weeklies,
            templates,
            extension,
            new_note_filename,
            uuid_type,
            uuid_sep,
            follow_creates_nonexisting,
            dailies_create_nonexisting,
            weeklies_create_nonexisting,
            image_link_style,
            sort,
            subdirs_in_links,
            plug_into_calendar,
            tag_notation,
            new_note_location,
            template_handling,
            rename_update_links,
            journal_auto_open,
            template_new_note,
            template_new_daily,
            template_new_weekly,
        );

        // Nullable fields: an explicit null clears the base value.
        if let Some(value) = self.image_subdir.clone() {
            debug!(key = "image_subdir", old = ?base.image_subdir, new = ?value, "override");
            base.image_subdir = value;
        }
        if let Some(value) = self.filename_space_subst.clone() {
            debug!(
                key = "filename_space_subst",
                old = ?base.filename_space_subst,
                new = ?value,
                "override"
            );
            base.filename_space_subst = value;
        }
        if let Some(value) = self.filter_extensions.clone() {
            debug!(
                key = "filter_extensions",
                old = ?base.filter_extensions,
                new = ?value,
                "override"
            );
            base.filter_extensions = value;
        }

        if let Some(calendar) = &self.calendar_opts {
            calendar.apply(&mut base.calendar_opts);
        }
    }
}
