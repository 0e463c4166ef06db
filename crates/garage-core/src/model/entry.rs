// ── Catalog entry ──

use serde::{Deserialize, Serialize};
use strum::Display;

use super::key::ModelKey;

/// One of the two independent classification dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    #[default]
    Class,
    Make,
}

impl Axis {
    /// Axis selected by the "categorize by make" flag.
    pub fn from_categorize_make(as_make: bool) -> Self {
        if as_make { Self::Make } else { Self::Class }
    }
}

/// One classifiable, spawnable model.
///
/// Produced by the catalog provider and treated as immutable between
/// refreshes. Display and make names are resolved lazily through the
/// host's name lookups; `class` and `make` are the raw grouping labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: ModelKey,
    pub class: String,
    pub make: String,
}

impl CatalogEntry {
    /// Entry keyed by a raw hash value.
    pub fn new(key: u32, class: impl Into<String>, make: impl Into<String>) -> Self {
        Self {
            key: ModelKey::new(key),
            class: class.into(),
            make: make.into(),
        }
    }

    /// The grouping label of this entry along `axis`.
    pub fn label(&self, axis: Axis) -> &str {
        match axis {
            Axis::Class => &self.class,
            Axis::Make => &self.make,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_follows_axis() {
        let entry = CatalogEntry::new(1, "Sedans", "Ford");
        assert_eq!(entry.label(Axis::Class), "Sedans");
        assert_eq!(entry.label(Axis::Make), "Ford");
    }

    #[test]
    fn axis_from_flag() {
        assert_eq!(Axis::from_categorize_make(true), Axis::Make);
        assert_eq!(Axis::from_categorize_make(false), Axis::Class);
    }
}
