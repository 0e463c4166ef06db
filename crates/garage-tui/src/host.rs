//! Terminal stand-in for the game: implements every host service over a
//! catalog file, an in-memory spawn log and a preview image folder.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use tracing::{debug, info, warn};

use garage_core::{
    CatalogEntry, CatalogProvider, ControlSuppressor, CoreError, DlcDefinition, ModelKey,
    NameResolver, PreviewCache, SpawnOptions, Spawner,
};

use crate::catalog_file::{CatalogFile, VehicleSpec};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Display label the game reports for a model it does not know.
const UNKNOWN_MODEL: &str = "CARNOTFOUND";

/// A spawn request as the terminal host saw it.
#[derive(Debug, Clone)]
pub struct SpawnRecord {
    pub key: ModelKey,
    pub model: Option<String>,
    pub options: SpawnOptions,
    pub at: DateTime<Local>,
}

pub struct TerminalHost {
    catalog_path: PathBuf,
    catalog: CatalogFile,
    models: HashMap<ModelKey, VehicleSpec>,
    sprites: HashMap<ModelKey, String>,
    image_names: BTreeSet<String>,
    spawn_log: Vec<SpawnRecord>,
    persistent: Vec<ModelKey>,
    suppressed: bool,
}

impl TerminalHost {
    pub fn open(catalog_path: impl Into<PathBuf>) -> Result<Self> {
        let catalog_path = catalog_path.into();
        let catalog = CatalogFile::load(&catalog_path)?;
        let mut host = Self {
            catalog_path,
            catalog: CatalogFile::default(),
            models: HashMap::new(),
            sprites: HashMap::new(),
            image_names: BTreeSet::new(),
            spawn_log: Vec::new(),
            persistent: Vec::new(),
            suppressed: false,
        };
        host.install(catalog);
        host.store_image_names();
        Ok(host)
    }

    fn install(&mut self, catalog: CatalogFile) {
        self.models = catalog
            .vehicles()
            .map(|spec| (spec.key(), spec.clone()))
            .collect();
        self.catalog = catalog;
    }

    /// Re-read the catalog file so edits show up on the next menu open.
    fn reload(&mut self) -> Result<()> {
        let catalog = CatalogFile::load(&self.catalog_path)?;
        self.install(catalog);
        debug!(path = %self.catalog_path.display(), models = self.models.len(), "catalog reloaded");
        Ok(())
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn spawn_log(&self) -> &[SpawnRecord] {
        &self.spawn_log
    }

    pub fn model_name(&self, key: ModelKey) -> Option<&str> {
        self.models.get(&key).map(|spec| spec.model.as_str())
    }

    /// Whether a text box suppressed controls since the last call.
    pub fn take_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.suppressed)
    }

    fn preview_images(&self) -> Vec<PathBuf> {
        let Some(dir) = &self.catalog.preview_dir else {
            return Vec::new();
        };
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot read preview folder");
                return Vec::new();
            }
        };
        entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            })
            .collect()
    }

    fn preview_line(&self, spec: &VehicleSpec) -> String {
        let model = spec.model.to_lowercase();
        if self.image_names.contains(&model) {
            format!("Preview: {model}")
        } else if let Some(sprite) = self.sprites.get(&spec.key()) {
            format!("Preview: sprite {sprite}")
        } else {
            "No preview available".into()
        }
    }
}

fn image_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_lowercase)
}

impl CatalogProvider for TerminalHost {
    fn cache_addons(&mut self) -> Result<Vec<CatalogEntry>, CoreError> {
        self.reload()
            .map_err(|e| CoreError::CatalogUnavailable { reason: format!("{e:#}") })?;
        Ok(self.catalog.addon_entries())
    }

    fn cache_dlcs(&mut self) -> Result<Vec<DlcDefinition>, CoreError> {
        Ok(self.catalog.dlc_definitions())
    }

    fn resolve_sprite_info(&mut self) {
        self.sprites = self
            .catalog
            .vehicles()
            .filter_map(|spec| spec.sprite.clone().map(|sprite| (spec.key(), sprite)))
            .collect();
        debug!(sprites = self.sprites.len(), "sprite info resolved");
    }

    fn game_version(&self) -> String {
        self.catalog.game_version.clone()
    }
}

impl PreviewCache for TerminalHost {
    fn clear_image_caches(&mut self) {
        self.image_names.clear();
    }

    fn store_image_names(&mut self) {
        self.image_names = self
            .preview_images()
            .into_iter()
            .filter_map(|path| image_stem(&path))
            .collect();
        debug!(images = self.image_names.len(), "preview images indexed");
    }

    fn clean_image_directory(&mut self, force: bool) {
        if !force {
            return;
        }
        let addons: BTreeSet<String> = self
            .catalog
            .addons
            .iter()
            .map(|spec| spec.model.to_lowercase())
            .collect();

        let mut removed = 0usize;
        for path in self.preview_images() {
            if image_stem(&path).is_some_and(|stem| addons.contains(&stem)) {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "cannot remove preview image"),
            }
        }
        info!(removed, "preview folder cleaned");
    }
}

impl NameResolver for TerminalHost {
    fn display_label(&self, key: ModelKey) -> String {
        self.models
            .get(&key)
            .map_or_else(|| UNKNOWN_MODEL.to_owned(), |spec| spec.display_label.clone())
    }

    fn make_label(&self, key: ModelKey) -> String {
        self.models
            .get(&key)
            .map(|spec| spec.make_label.clone())
            .unwrap_or_default()
    }

    fn label_text(&self, label: &str) -> Option<String> {
        self.catalog.labels.get(label).cloned()
    }

    fn guess_model_name(&self, key: ModelKey) -> String {
        self.model_name(key).map_or_else(|| key.to_string(), str::to_owned)
    }

    fn vehicle_info(&self, entry: &CatalogEntry) -> Vec<String> {
        let Some(spec) = self.models.get(&entry.key) else {
            return vec![format!("Unknown model {}", entry.key)];
        };
        let mut lines = vec![
            format!("Model: {}", spec.model),
            format!("Class: {}", entry.class),
            format!("Make: {}", entry.make),
            self.preview_line(spec),
        ];
        lines.extend(spec.info.iter().cloned());
        lines
    }
}

impl Spawner for TerminalHost {
    fn spawn_vehicle(&mut self, key: ModelKey, options: SpawnOptions) {
        let model = self.model_name(key).map(str::to_owned);
        if model.is_none() {
            warn!(%key, "spawn requested for a model the catalog does not know");
        }
        if options.persistent {
            self.persistent.push(key);
        }
        self.spawn_log.push(SpawnRecord {
            key,
            model,
            options,
            at: Local::now(),
        });
    }

    fn clear_persistent_vehicles(&mut self) {
        info!(count = self.persistent.len(), "clearing persistent vehicles");
        self.persistent.clear();
    }

    fn persistent_count(&self) -> usize {
        self.persistent.len()
    }
}

impl ControlSuppressor for TerminalHost {
    fn suppress_controls(&mut self) {
        self.suppressed = true;
    }
}
