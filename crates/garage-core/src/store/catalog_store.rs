// ── Central catalog store ──
//
// Owned by the application root and lent to the menu each frame. All
// collections are plain vectors: the store is single-writer by
// construction, so no interior locking is needed.

use chrono::{DateTime, Utc};

use super::labels::{AxisLabels, LabelSet};
use crate::model::{Axis, CatalogEntry, Dlc};
use crate::search::SearchSource;

/// Every catalog collection the menu reads, plus derived label sets.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub(crate) addons: Vec<CatalogEntry>,
    pub(crate) addon_labels: AxisLabels,
    pub(crate) dlcs: Vec<Dlc>,
    /// Base game plus every DLC, deduplicated by key.
    pub(crate) official: Vec<CatalogEntry>,
    pub(crate) official_labels: AxisLabels,
    pub(crate) last_refresh: Option<DateTime<Utc>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn addons(&self) -> &[CatalogEntry] {
        &self.addons
    }

    pub fn official(&self) -> &[CatalogEntry] {
        &self.official
    }

    pub fn dlcs(&self) -> &[Dlc] {
        &self.dlcs
    }

    pub fn dlc(&self, index: usize) -> Option<&Dlc> {
        self.dlcs.get(index)
    }

    pub fn dlc_by_name(&self, name: &str) -> Option<&Dlc> {
        self.dlcs.iter().find(|dlc| dlc.name == name)
    }

    /// The global pool a search source refers to.
    pub fn pool(&self, source: SearchSource) -> &[CatalogEntry] {
        match source {
            SearchSource::Official => &self.official,
            SearchSource::Addon => &self.addons,
        }
    }

    // ── Label sets ───────────────────────────────────────────────────

    pub fn addon_labels(&self, axis: Axis) -> &LabelSet {
        self.addon_labels.get(axis)
    }

    /// Union of every DLC's labels along `axis`.
    pub fn official_labels(&self, axis: Axis) -> &LabelSet {
        self.official_labels.get(axis)
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// How long ago the last refresh occurred, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh.map(|t| Utc::now() - t)
    }
}
