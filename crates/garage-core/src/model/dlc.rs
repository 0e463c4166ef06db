// ── DLC packs ──

use serde::{Deserialize, Serialize};

use super::entry::{Axis, CatalogEntry};
use crate::store::labels::{AxisLabels, LabelSet};

/// A DLC pack as delivered by the catalog provider: a name and the
/// entries it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlcDefinition {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// A DLC pack with its own label sets, derived from its entry subset.
///
/// An empty entry list is legal: it means the running game build does not
/// ship this pack's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dlc {
    pub name: String,
    pub axis_labels: AxisLabels,
    pub entries: Vec<CatalogEntry>,
}

impl Dlc {
    pub fn labels(&self, axis: Axis) -> &LabelSet {
        self.axis_labels.get(axis)
    }

    pub fn is_available(&self) -> bool {
        !self.entries.is_empty()
    }
}

impl From<DlcDefinition> for Dlc {
    fn from(def: DlcDefinition) -> Self {
        Self {
            axis_labels: AxisLabels::build(&def.entries),
            name: def.name,
            entries: def.entries,
        }
    }
}
