// ── Classification index ──
//
// Label sets are derived, never maintained: every refresh rebuilds them
// from scratch so a label whose last entry disappeared cannot linger.

use std::collections::BTreeSet;

use crate::model::{Axis, CatalogEntry};

/// Deduplicated category labels along one axis, in sorted order.
pub type LabelSet = BTreeSet<String>;

/// Collect the distinct `axis` labels of `entries` in a single pass.
pub fn build_label_set(entries: &[CatalogEntry], axis: Axis) -> LabelSet {
    entries
        .iter()
        .map(|entry| entry.label(axis).to_owned())
        .collect()
}

/// Both axes at once, for callers that keep the pair together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisLabels {
    pub classes: LabelSet,
    pub makes: LabelSet,
}

impl AxisLabels {
    pub fn build(entries: &[CatalogEntry]) -> Self {
        Self {
            classes: build_label_set(entries, Axis::Class),
            makes: build_label_set(entries, Axis::Make),
        }
    }

    pub fn get(&self, axis: Axis) -> &LabelSet {
        match axis {
            Axis::Class => &self.classes,
            Axis::Make => &self.makes,
        }
    }
}
