// ── Entry rendering and activation ──
//
// Two-phase render: the summary label is resolved for every visible row,
// the info block only for the focused one. Activation forwards the model
// key to the spawner and reports nothing back.

use tracing::info;

use crate::model::{CatalogEntry, ModelKey};
use crate::services::{NameResolver, Spawner};
use crate::settings::SpawnOptions;

/// Localized text for `label`, or the label itself when unresolved.
pub fn resolve_label<N: NameResolver + ?Sized>(names: &N, label: &str) -> String {
    names
        .label_text(label)
        .unwrap_or_else(|| label.to_owned())
}

/// Display name of a model, falling back to its raw label.
pub fn display_name<N: NameResolver + ?Sized>(names: &N, key: ModelKey) -> String {
    resolve_label(names, &names.display_label(key))
}

/// A rendered entry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub key: ModelKey,
    pub label: String,
    /// Present only when the row was focused at render time.
    pub details: Option<Vec<String>>,
}

/// Always-computed half of the render.
pub fn summary<N: NameResolver + ?Sized>(entry: &CatalogEntry, names: &N) -> String {
    display_name(names, entry.key)
}

/// Focus-only half of the render.
pub fn details<N: NameResolver + ?Sized>(entry: &CatalogEntry, names: &N) -> Vec<String> {
    names.vehicle_info(entry)
}

/// Render `entry`, resolving its info block only if `focused` says so.
pub fn render_entry<N, F>(entry: &CatalogEntry, names: &N, focused: F) -> EntryRow
where
    N: NameResolver + ?Sized,
    F: FnOnce() -> bool,
{
    EntryRow {
        key: entry.key,
        label: summary(entry, names),
        details: focused().then(|| details(entry, names)),
    }
}

/// Explicit confirmation on an entry row.
pub fn activate<S: Spawner + ?Sized>(key: ModelKey, spawner: &mut S, options: SpawnOptions) {
    info!(%key, ?options, "spawning vehicle");
    spawner.spawn_vehicle(key, options);
}
