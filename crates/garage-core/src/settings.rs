// ── Menu settings ──
//
// The persisted option set and the boolean toggles the settings page
// exposes. Storage is abstracted behind `SettingsStore`; every toggle is
// written through immediately.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::CoreError;
use crate::model::Axis;
use crate::search::SearchSource;

/// Persisted menu options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub spawn_inside: bool,
    pub spawn_inplace: bool,
    pub persistent: bool,
    pub spawn_by_name: bool,
    pub categorize_make: bool,
    pub list_all_dlcs: bool,
    pub merge_dlcs: bool,
    pub search_menu: bool,
    pub search_category: SearchSource,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            spawn_inside: true,
            spawn_inplace: false,
            persistent: false,
            spawn_by_name: true,
            categorize_make: false,
            list_all_dlcs: true,
            merge_dlcs: false,
            search_menu: true,
            search_category: SearchSource::default(),
        }
    }
}

impl MenuSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::SpawnInside => self.spawn_inside,
            SettingKey::SpawnInplace => self.spawn_inplace,
            SettingKey::Persistent => self.persistent,
            SettingKey::SpawnByName => self.spawn_by_name,
            SettingKey::CategorizeMake => self.categorize_make,
            SettingKey::ListAllDlcs => self.list_all_dlcs,
            SettingKey::MergeDlcs => self.merge_dlcs,
            SettingKey::SearchMenu => self.search_menu,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::SpawnInside => &mut self.spawn_inside,
            SettingKey::SpawnInplace => &mut self.spawn_inplace,
            SettingKey::Persistent => &mut self.persistent,
            SettingKey::SpawnByName => &mut self.spawn_by_name,
            SettingKey::CategorizeMake => &mut self.categorize_make,
            SettingKey::ListAllDlcs => &mut self.list_all_dlcs,
            SettingKey::MergeDlcs => &mut self.merge_dlcs,
            SettingKey::SearchMenu => &mut self.search_menu,
        };
        *slot = value;
    }

    /// Flip a toggle, returning its new value.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let value = !self.get(key);
        self.set(key, value);
        value
    }

    /// Classification axis currently selected for category pages.
    pub fn axis(&self) -> Axis {
        Axis::from_categorize_make(self.categorize_make)
    }

    pub fn spawn_options(&self) -> SpawnOptions {
        SpawnOptions {
            inside: self.spawn_inside,
            in_place: self.spawn_inplace,
            persistent: self.persistent,
        }
    }
}

/// How a spawned model is placed, forwarded to the spawner as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnOptions {
    pub inside: bool,
    pub in_place: bool,
    pub persistent: bool,
}

/// A boolean option exposed on the settings page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SettingKey {
    SpawnInside,
    SpawnInplace,
    Persistent,
    SpawnByName,
    CategorizeMake,
    ListAllDlcs,
    MergeDlcs,
    SearchMenu,
}

impl SettingKey {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SpawnInside => "Spawn inside vehicle",
            Self::SpawnInplace => "Spawn inplace",
            Self::Persistent => "Spawned cars are persistent",
            Self::SpawnByName => "Spawn manually",
            Self::CategorizeMake => "Categorize by make",
            Self::ListAllDlcs => "List all DLCs",
            Self::MergeDlcs => "Merge DLCs",
            Self::SearchMenu => "Enable search menu",
        }
    }

    /// Help lines shown while the toggle is highlighted.
    pub fn help(self, settings: &MenuSettings) -> Vec<String> {
        match self {
            Self::SpawnInplace => vec![
                "Don't spawn to the right of the previous car, but spawn at the current \
                 position. This replaces the current vehicle."
                    .into(),
                "Only active if \"Spawn inside vehicle\" is turned on.".into(),
            ],
            Self::CategorizeMake => vec![format!("Categorizing by {}.", settings.axis())],
            Self::ListAllDlcs => vec![
                "Show all official DLC vehicles. These will appear in their own submenu, \
                 sorted per class, per DLC."
                    .into(),
            ],
            Self::MergeDlcs => vec!["Don't sort per DLC and just show the vehicles per class.".into()],
            Self::SpawnInside | Self::Persistent | Self::SpawnByName | Self::SearchMenu => Vec::new(),
        }
    }
}

// ── Persistence ─────────────────────────────────────────────────────

/// Durable storage for `MenuSettings`.
pub trait SettingsStore {
    fn save(&mut self, settings: &MenuSettings) -> Result<(), CoreError>;

    fn read(&mut self) -> Result<MenuSettings, CoreError>;
}

/// In-memory store: keeps the last saved value, returns defaults before
/// the first save.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    saved: Option<MenuSettings>,
    save_count: usize,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl SettingsStore for MemorySettingsStore {
    fn save(&mut self, settings: &MenuSettings) -> Result<(), CoreError> {
        self.saved = Some(settings.clone());
        self.save_count += 1;
        Ok(())
    }

    fn read(&mut self) -> Result<MenuSettings, CoreError> {
        Ok(self.saved.clone().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports() {
        let mut settings = MenuSettings::default();
        let before = settings.get(SettingKey::MergeDlcs);
        assert_eq!(settings.toggle(SettingKey::MergeDlcs), !before);
        assert_eq!(settings.get(SettingKey::MergeDlcs), !before);
    }

    #[test]
    fn every_key_round_trips_through_set() {
        for key in SettingKey::all() {
            let mut settings = MenuSettings::default();
            settings.set(key, true);
            assert!(settings.get(key), "{key:?}");
            settings.set(key, false);
            assert!(!settings.get(key), "{key:?}");
        }
    }

    #[test]
    fn list_all_dlcs_survives_store_round_trip() {
        let mut store = MemorySettingsStore::new();
        let mut settings = MenuSettings::default();
        let toggled = settings.toggle(SettingKey::ListAllDlcs);
        store.save(&settings).unwrap();

        let read_back = store.read().unwrap();
        assert_eq!(read_back.list_all_dlcs, toggled);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn categorize_help_names_current_axis() {
        let mut settings = MenuSettings::default();
        settings.categorize_make = true;
        assert_eq!(SettingKey::CategorizeMake.help(&settings), vec!["Categorizing by make."]);
        settings.categorize_make = false;
        assert_eq!(SettingKey::CategorizeMake.help(&settings), vec!["Categorizing by class."]);
    }

    #[test]
    fn spawn_options_mirror_flags() {
        let settings = MenuSettings {
            spawn_inside: true,
            spawn_inplace: true,
            persistent: false,
            ..MenuSettings::default()
        };
        let opts = settings.spawn_options();
        assert!(opts.inside && opts.in_place && !opts.persistent);
    }
}
