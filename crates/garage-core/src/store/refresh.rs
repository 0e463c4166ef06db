// ── Refresh application logic ──
//
// A refresh replaces each collection wholesale and rebuilds every label
// set derived from it. Nothing is merged with the previous contents.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use super::CatalogStore;
use super::labels::AxisLabels;
use crate::model::{CatalogEntry, Dlc, DlcDefinition};
use crate::services::CatalogProvider;

/// Keep the first occurrence of every key, preserving order.
fn dedup_by_key<'a, I>(entries: I) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.key))
        .cloned()
        .collect()
}

impl CatalogStore {
    /// Replace the add-on pool and its label sets.
    pub fn replace_addons(&mut self, entries: Vec<CatalogEntry>) {
        self.addons = dedup_by_key(&entries);
        self.addon_labels = AxisLabels::build(&self.addons);
        debug!(
            addons = self.addons.len(),
            classes = self.addon_labels.classes.len(),
            makes = self.addon_labels.makes.len(),
            "add-on catalog replaced"
        );
    }

    /// Replace every DLC pack, the merged official pool, and all of their
    /// label sets.
    pub fn replace_dlcs(&mut self, definitions: Vec<DlcDefinition>) {
        self.dlcs = definitions.into_iter().map(Dlc::from).collect();
        self.official = dedup_by_key(self.dlcs.iter().flat_map(|dlc| dlc.entries.iter()));
        self.official_labels = AxisLabels::build(&self.official);
        debug!(
            dlcs = self.dlcs.len(),
            official = self.official.len(),
            "DLC catalog replaced"
        );
    }

    /// Pull fresh collections from `provider`.
    ///
    /// A provider failure leaves the affected collection as it was.
    pub fn refresh<P: CatalogProvider + ?Sized>(&mut self, provider: &mut P) {
        match provider.cache_addons() {
            Ok(entries) => self.replace_addons(entries),
            Err(e) => warn!(error = %e, "add-on scan failed, keeping previous catalog"),
        }
        match provider.cache_dlcs() {
            Ok(definitions) => self.replace_dlcs(definitions),
            Err(e) => warn!(error = %e, "DLC scan failed, keeping previous catalog"),
        }
        provider.resolve_sprite_info();
        self.last_refresh = Some(Utc::now());
    }
}
