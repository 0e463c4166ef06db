//! On-disk catalog that stands in for the game's vehicle tables.
//!
//! TOML by default; a `.json` extension switches to JSON. Model keys are
//! derived from model names with the same hash the game uses.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use garage_core::{CatalogEntry, DlcDefinition, ModelKey};

/// One vehicle model as described in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Spawn name, e.g. `"adder"`.
    pub model: String,
    /// Raw display label, e.g. `"ADDER"`.
    pub display_label: String,
    /// Raw make label, e.g. `"TRUFFADE"`.
    #[serde(default)]
    pub make_label: String,
    pub class: String,
    /// Make name used for classification. Defaults to the localized make
    /// label.
    #[serde(default)]
    pub make: Option<String>,
    /// Preview sprite, for official vehicles that have one.
    #[serde(default)]
    pub sprite: Option<String>,
    /// Extra lines shown in the info panel.
    #[serde(default)]
    pub info: Vec<String>,
}

impl VehicleSpec {
    pub fn key(&self) -> ModelKey {
        ModelKey::from_name(&self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlcSpec {
    pub name: String,
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_game_version")]
    pub game_version: String,
    /// Folder holding add-on preview images, relative to the catalog file.
    #[serde(default)]
    pub preview_dir: Option<PathBuf>,
    /// Localized text table keyed by raw label.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub addons: Vec<VehicleSpec>,
    #[serde(default)]
    pub dlcs: Vec<DlcSpec>,
}

fn default_game_version() -> String {
    "unknown".into()
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading catalog {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut catalog: Self = if is_json {
            serde_json::from_str(&text).wrap_err("parsing JSON catalog")?
        } else {
            toml::from_str(&text).wrap_err("parsing TOML catalog")?
        };

        catalog.preview_dir = catalog.preview_dir.take().map(|dir| match path.parent() {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        });
        Ok(catalog)
    }

    fn make_name(&self, spec: &VehicleSpec) -> String {
        spec.make.clone().unwrap_or_else(|| {
            self.labels
                .get(&spec.make_label)
                .cloned()
                .unwrap_or_else(|| spec.make_label.clone())
        })
    }

    fn entry(&self, spec: &VehicleSpec) -> CatalogEntry {
        CatalogEntry {
            key: spec.key(),
            class: spec.class.clone(),
            make: self.make_name(spec),
        }
    }

    pub fn addon_entries(&self) -> Vec<CatalogEntry> {
        self.addons.iter().map(|spec| self.entry(spec)).collect()
    }

    pub fn dlc_definitions(&self) -> Vec<DlcDefinition> {
        self.dlcs
            .iter()
            .map(|dlc| DlcDefinition {
                name: dlc.name.clone(),
                entries: dlc.vehicles.iter().map(|spec| self.entry(spec)).collect(),
            })
            .collect()
    }

    /// Every vehicle in the file, add-ons first.
    pub fn vehicles(&self) -> impl Iterator<Item = &VehicleSpec> {
        self.addons
            .iter()
            .chain(self.dlcs.iter().flat_map(|dlc| dlc.vehicles.iter()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
game_version = "1.0.3095.0"
preview_dir = "previews"

[labels]
ADDER = "Adder"
TRUFFADE = "Truffade"

[[addons]]
model = "m3e46"
display_label = "M3E46"
make_label = "BMW"
class = "Sports"

[[dlcs]]
name = "Base"

[[dlcs.vehicles]]
model = "adder"
display_label = "ADDER"
make_label = "TRUFFADE"
class = "Super"

[[dlcs]]
name = "Lowriders"
"#;

    #[test]
    fn parses_toml_and_resolves_preview_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = CatalogFile::load(&path).unwrap();
        assert_eq!(catalog.game_version, "1.0.3095.0");
        assert_eq!(catalog.preview_dir, Some(dir.path().join("previews")));
        assert_eq!(catalog.dlcs.len(), 2);
        assert!(catalog.dlcs[1].vehicles.is_empty());
    }

    #[test]
    fn make_falls_back_through_labels_to_raw() {
        let catalog: CatalogFile = toml::from_str(SAMPLE).unwrap();
        let addons = catalog.addon_entries();
        assert_eq!(addons[0].make, "BMW");

        let dlcs = catalog.dlc_definitions();
        assert_eq!(dlcs[0].entries[0].make, "Truffade");
        assert_eq!(dlcs[0].entries[0].key, ModelKey::new(0xB779_A091));
    }

    #[test]
    fn json_catalogs_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"addons":[{"model":"t20","display_label":"T20","class":"Super"}]}"#,
        )
        .unwrap();

        let catalog = CatalogFile::load(&path).unwrap();
        assert_eq!(catalog.game_version, "unknown");
        assert_eq!(catalog.addons[0].make_label, "");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CatalogFile::load(&dir.path().join("nope.toml")).is_err());
    }
}
