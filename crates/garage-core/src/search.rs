// ── Live catalog search ──
//
// Recomputed from scratch every frame: no index, no ranking, source order
// preserved. An entry matches when the query is a case-insensitive
// substring of any of its five name fields.

use serde::{Deserialize, Serialize};

use crate::dispatch::resolve_label;
use crate::input::TextInput;
use crate::model::CatalogEntry;
use crate::services::NameResolver;

/// Which global pool the search page filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    /// Base game plus every official DLC.
    #[default]
    Official,
    Addon,
}

impl SearchSource {
    pub const ALL: [SearchSource; 2] = [Self::Official, Self::Addon];

    pub fn label(self) -> &'static str {
        match self {
            Self::Official => "Game vehicles",
            Self::Addon => "Add-on vehicles",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Official => 0,
            Self::Addon => 1,
        }
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Official => Self::Addon,
            Self::Addon => Self::Official,
        }
    }

    /// Previous option, wrapping around.
    pub fn prev(self) -> Self {
        // Two options: prev and next coincide.
        self.next()
    }
}

/// Search page state: the query box and the pool selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: TextInput,
    pub source: SearchSource,
}

/// The text fields of one entry that a query is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFields {
    pub raw_name: String,
    pub display_name: String,
    pub model_name: String,
    pub make_raw: String,
    pub make_name: String,
}

impl SearchFields {
    pub fn resolve<N: NameResolver + ?Sized>(entry: &CatalogEntry, names: &N) -> Self {
        let raw_name = names.display_label(entry.key);
        let display_name = resolve_label(names, &raw_name);
        let make_raw = names.make_label(entry.key);
        let make_name = resolve_label(names, &make_raw);
        Self {
            model_name: names.guess_model_name(entry.key),
            raw_name,
            display_name,
            make_raw,
            make_name,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.raw_name.as_str(),
            self.display_name.as_str(),
            self.model_name.as_str(),
            self.make_raw.as_str(),
            self.make_name.as_str(),
        ]
        .into_iter()
    }

    /// Whether any field contains `needle`, which must already be
    /// lowercase.
    fn matches_lowered(&self, needle: &str) -> bool {
        needle.is_empty() || self.iter().any(|field| field.to_lowercase().contains(needle))
    }
}

/// Filter `entries` down to those matching `query`, keeping source order.
pub fn filter<'a, N: NameResolver + ?Sized>(
    entries: &'a [CatalogEntry],
    query: &str,
    names: &N,
) -> Vec<&'a CatalogEntry> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| SearchFields::resolve(entry, names).matches_lowered(&needle))
        .collect()
}
