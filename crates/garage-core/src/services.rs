// ── External collaborators ──
//
// Everything the menu needs from its host process, expressed as traits.
// The core calls these synchronously from inside a frame and never
// observes the outcome of a spawn.

use crate::error::CoreError;
use crate::model::{CatalogEntry, DlcDefinition, ModelKey};
use crate::settings::SpawnOptions;

/// Catalog acquisition: add-on scanning, official DLC tables, previews.
pub trait CatalogProvider {
    /// Scan installed add-on models.
    fn cache_addons(&mut self) -> Result<Vec<CatalogEntry>, CoreError>;

    /// Official DLC packs, base game included, in display order.
    fn cache_dlcs(&mut self) -> Result<Vec<DlcDefinition>, CoreError>;

    /// Recompute preview sprite lookups. Must be idempotent.
    fn resolve_sprite_info(&mut self);

    /// Human-readable version of the running game build.
    fn game_version(&self) -> String;
}

/// Preview image housekeeping.
pub trait PreviewCache {
    /// Drop the image name list, the missing-image list, the loaded images
    /// and their metadata.
    fn clear_image_caches(&mut self);

    /// Re-scan the preview folder and record every image name.
    fn store_image_names(&mut self);

    /// Delete preview images that belong to no known add-on.
    fn clean_image_directory(&mut self, force: bool);
}

/// Name and info lookups keyed by model.
pub trait NameResolver {
    /// Raw internal display label of a model (e.g. `"ADDER"`).
    fn display_label(&self, key: ModelKey) -> String;

    /// Raw internal make label of a model.
    fn make_label(&self, key: ModelKey) -> String;

    /// Localized text for a label, `None` when the label is unresolved.
    fn label_text(&self, label: &str) -> Option<String>;

    /// Best guess at the model's spawn name.
    fn guess_model_name(&self, key: ModelKey) -> String;

    /// Multi-line info block for the highlighted entry.
    fn vehicle_info(&self, entry: &CatalogEntry) -> Vec<String>;
}

/// The spawning side effect and persistence tracking.
pub trait Spawner {
    /// Fire-and-forget spawn request.
    fn spawn_vehicle(&mut self, key: ModelKey, options: SpawnOptions);

    fn clear_persistent_vehicles(&mut self);

    fn persistent_count(&self) -> usize;
}

/// Player/world input suppression while a text box holds capture.
pub trait ControlSuppressor {
    /// Disable the pause menu and all default control actions for the
    /// current frame.
    fn suppress_controls(&mut self);
}

/// Everything a host must provide to drive the menu.
pub trait Host: CatalogProvider + PreviewCache + NameResolver + Spawner + ControlSuppressor {}

impl<T> Host for T where T: CatalogProvider + PreviewCache + NameResolver + Spawner + ControlSuppressor {}
