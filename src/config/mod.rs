//! Configuration resolution.
//!
//! Turns user-supplied setup input into one complete, internally consistent
//! configuration: pick a vault, build defaults anchored at its home, overlay
//! the vault's overrides, then compute derived fields.

pub mod defaults;
pub mod derive;
pub mod patch;
pub mod types;
pub mod vaults;

pub use defaults::resolve_home;
pub use derive::derive_all;
pub use patch::{CalendarPatch, ConfigPatch};
pub use types::{
    CalendarConfig, CalendarMark, Config, ImageLinkStyle, NOTES_FILETYPE, NewNoteFilename,
    NewNoteLocation, NoteKind, NoteTypeTemplates, SortOrder, TagNotation, TemplateBinding,
    TemplateHandling,
};
pub use vaults::{DEFAULT_VAULT_KEY, ResolvedSetup, SetupOptions, VaultSelection, resolve, select};
