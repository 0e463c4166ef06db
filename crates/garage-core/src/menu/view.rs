// ── Rendered page model ──
//
// What one frame of the menu looks like, independent of any drawing
// backend. Rows carry enough structure for the machine to act on a
// confirmation without re-deriving the page.

use crate::model::ModelKey;
use crate::search::SearchSource;
use crate::settings::SettingKey;

/// Which text box a row edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    ManualSpawn,
    SearchQuery,
}

/// One-shot maintenance actions on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Re-resolve sprites and reload the preview image list.
    ReloadPreviews,
    /// Delete stray preview images, then reload the list.
    CleanPreviewFolder,
    ClearPersistence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Navigates to `target`, optionally refreshing sprite lookups first.
    Link { target: String, refresh_sprites: bool },
    Toggle { key: SettingKey, value: bool },
    Command(SettingsCommand),
    /// Two-way search pool selector.
    SourceSelector { selected: SearchSource },
    TextInput { field: InputField, value: String },
    /// A catalog entry that spawns on confirmation.
    Entry { key: ModelKey },
    /// Inert text.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub kind: RowKind,
    /// Help or info lines. Entry rows only carry these while highlighted.
    pub details: Vec<String>,
}

impl Row {
    pub fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: RowKind::Link { target: target.into(), refresh_sprites: false },
            details: Vec::new(),
        }
    }

    /// A link that re-resolves preview sprites before navigating.
    pub fn sprite_link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: RowKind::Link { target: target.into(), refresh_sprites: true },
            details: Vec::new(),
        }
    }

    pub fn info(label: impl Into<String>, details: Vec<String>) -> Self {
        Self { label: label.into(), kind: RowKind::Info, details }
    }

    /// Target page of a link row.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            RowKind::Link { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Model key of an entry row.
    pub fn entry_key(&self) -> Option<ModelKey> {
        match self.kind {
            RowKind::Entry { key } => Some(key),
            _ => None,
        }
    }

    pub fn is_input(&self, field: InputField) -> bool {
        matches!(&self.kind, RowKind::TextInput { field: f, .. } if *f == field)
    }
}

/// One frame of the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    /// Id of the page actually drawn, after any fallback.
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<Row>,
}

impl PageView {
    pub fn row_labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.label == label)
    }

    pub fn entry_keys(&self) -> impl Iterator<Item = ModelKey> + '_ {
        self.rows.iter().filter_map(Row::entry_key)
    }
}
