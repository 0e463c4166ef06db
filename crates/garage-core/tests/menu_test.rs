#![allow(clippy::unwrap_used)]
// End-to-end menu tests driving `MenuMachine` frame by frame against an
// in-memory host.

use std::collections::{BTreeSet, HashMap};

use pretty_assertions::assert_eq;

use garage_core::{
    CatalogEntry, CatalogProvider, CatalogStore, ControlSuppressor, CoreError, DlcDefinition,
    FrameInput, FrameOutcome, FrameResult, Key, KeyFrame, MemorySettingsStore, MenuCommand,
    MenuContext, MenuMachine, MenuSettings, ModelKey, NameResolver, PageView, PreviewCache,
    SearchSource, SettingKey, SettingsCommand, SettingsStore, SpawnOptions, Spawner, Step,
};

// ── Fake host ───────────────────────────────────────────────────────

#[derive(Default)]
struct FakeHost {
    addons: Vec<CatalogEntry>,
    dlcs: Vec<DlcDefinition>,
    names: HashMap<u32, (&'static str, &'static str)>,
    texts: HashMap<&'static str, &'static str>,
    calls: Vec<String>,
    spawned: Vec<(ModelKey, SpawnOptions)>,
    suppressed: usize,
    persistent: usize,
}

impl FakeHost {
    fn new() -> Self {
        Self {
            addons: vec![
                CatalogEntry::new(101, "Super", "Pegassi"),
                CatalogEntry::new(102, "Super", "Truffade"),
                CatalogEntry::new(103, "Sports", "Pegassi"),
            ],
            dlcs: vec![
                DlcDefinition {
                    name: "Base".into(),
                    entries: vec![
                        CatalogEntry::new(1, "Super", "Truffade"),
                        CatalogEntry::new(2, "Super", "Pegassi"),
                        CatalogEntry::new(3, "Muscle", "Vapid"),
                    ],
                },
                DlcDefinition {
                    name: "Heists".into(),
                    entries: vec![
                        CatalogEntry::new(2, "Super", "Pegassi"),
                        CatalogEntry::new(4, "Sports", "Pegassi"),
                    ],
                },
                DlcDefinition { name: "Lowriders".into(), entries: Vec::new() },
            ],
            names: HashMap::from([
                (1, ("ADDER", "TRUFFADE")),
                (2, ("ZENTORNO", "PEGASSI")),
                (3, ("DOMINATOR", "VAPID")),
                (4, ("OSIRIS", "PEGASSI")),
                (101, ("ADDONONE", "PEGASSI")),
                (102, ("ADDONTWO", "TRUFFADE")),
                (103, ("ADDONTHREE", "PEGASSI")),
            ]),
            texts: HashMap::from([
                ("ADDER", "Adder"),
                ("ZENTORNO", "Zentorno"),
                ("PEGASSI", "Pegassi"),
                ("TRUFFADE", "Truffade"),
            ]),
            persistent: 3,
            ..Self::default()
        }
    }

    fn record(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }
}

impl CatalogProvider for FakeHost {
    fn cache_addons(&mut self) -> Result<Vec<CatalogEntry>, CoreError> {
        Ok(self.addons.clone())
    }
    fn cache_dlcs(&mut self) -> Result<Vec<DlcDefinition>, CoreError> {
        Ok(self.dlcs.clone())
    }
    fn resolve_sprite_info(&mut self) {
        self.record("resolve_sprite_info");
    }
    fn game_version(&self) -> String {
        "v1.0.1868.0".into()
    }
}

impl PreviewCache for FakeHost {
    fn clear_image_caches(&mut self) {
        self.record("clear_image_caches");
    }
    fn store_image_names(&mut self) {
        self.record("store_image_names");
    }
    fn clean_image_directory(&mut self, force: bool) {
        self.record(format!("clean_image_directory({force})"));
    }
}

impl NameResolver for FakeHost {
    fn display_label(&self, key: ModelKey) -> String {
        self.names.get(&key.raw()).map_or("CARNOTFOUND", |n| n.0).to_owned()
    }
    fn make_label(&self, key: ModelKey) -> String {
        self.names.get(&key.raw()).map_or("", |n| n.1).to_owned()
    }
    fn label_text(&self, label: &str) -> Option<String> {
        self.texts.get(label).map(|s| (*s).to_owned())
    }
    fn guess_model_name(&self, key: ModelKey) -> String {
        self.display_label(key).to_lowercase()
    }
    fn vehicle_info(&self, entry: &CatalogEntry) -> Vec<String> {
        vec![format!("Class: {}", entry.class)]
    }
}

impl Spawner for FakeHost {
    fn spawn_vehicle(&mut self, key: ModelKey, options: SpawnOptions) {
        self.spawned.push((key, options));
    }
    fn clear_persistent_vehicles(&mut self) {
        self.record("clear_persistent_vehicles");
        self.persistent = 0;
    }
    fn persistent_count(&self) -> usize {
        self.persistent
    }
}

impl ControlSuppressor for FakeHost {
    fn suppress_controls(&mut self) {
        self.suppressed += 1;
    }
}

// ── Harness ─────────────────────────────────────────────────────────

struct Harness {
    machine: MenuMachine,
    store: CatalogStore,
    settings: MenuSettings,
    settings_store: MemorySettingsStore,
    host: FakeHost,
}

impl Harness {
    fn open_with(settings: MenuSettings) -> Self {
        let mut h = Self {
            machine: MenuMachine::new(),
            store: CatalogStore::new(),
            settings,
            settings_store: MemorySettingsStore::new(),
            host: FakeHost::new(),
        };
        h.open();
        h
    }

    fn open_default() -> Self {
        Self::open_with(MenuSettings::default())
    }

    fn open(&mut self) {
        let mut ctx = MenuContext {
            store: &mut self.store,
            settings: &mut self.settings,
            settings_store: &mut self.settings_store,
            host: &mut self.host,
        };
        self.machine.open(&mut ctx);
    }

    fn run(&mut self, highlighted: usize, keys: KeyFrame, command: Option<MenuCommand>) -> FrameResult {
        let mut ctx = MenuContext {
            store: &mut self.store,
            settings: &mut self.settings,
            settings_store: &mut self.settings_store,
            host: &mut self.host,
        };
        self.machine.frame(&mut ctx, &FrameInput { highlighted, keys, command })
    }

    fn view(&mut self) -> PageView {
        self.run(0, KeyFrame::new(), None).view
    }

    fn press(&mut self, highlighted: usize, command: MenuCommand) -> FrameOutcome {
        self.run(highlighted, KeyFrame::new(), Some(command)).outcome
    }

    /// Activate the row labelled `label` on the current page.
    fn select(&mut self, label: &str) -> FrameOutcome {
        let view = self.view();
        let index = view
            .position(label)
            .unwrap_or_else(|| panic!("no row {label:?} on {}: {:?}", view.id, view.rows));
        self.press(index, MenuCommand::Activate)
    }

    fn back(&mut self) -> FrameOutcome {
        self.press(0, MenuCommand::Back)
    }

    /// Hold the highlight on `row` and type `text`, one key per frame.
    fn type_text(&mut self, row: usize, text: &str) {
        self.run(row, KeyFrame::new(), None);
        for c in text.chars() {
            let key = if c == '_' { Key::Underscore } else { Key::Char(c) };
            self.run(row, [key].into_iter().collect(), None);
        }
    }
}

fn labels(view: &PageView) -> Vec<&str> {
    view.row_labels().collect()
}

/// Every entry key reachable from the current page through link rows.
fn reachable_entries(h: &mut Harness) -> BTreeSet<u32> {
    let view = h.view();
    let mut keys: BTreeSet<u32> = view.entry_keys().map(ModelKey::raw).collect();
    for (index, row) in view.rows.iter().enumerate() {
        if row.target().is_some() {
            h.press(index, MenuCommand::Activate);
            keys.extend(reachable_entries(h));
            h.back();
        }
    }
    keys
}

// ── Classification ──────────────────────────────────────────────────

#[test]
fn main_page_lists_addon_categories_per_axis() {
    let mut h = Harness::open_default();
    let view = h.view();
    assert_eq!(view.id, "mainmenu");
    assert_eq!(view.title, "Add-on spawner");
    assert_eq!(
        labels(&view),
        vec!["Settings", "Spawn by name", "Spawn official DLCs", "Search vehicles", "Sports", "Super"]
    );

    h.select("Settings");
    assert_eq!(
        h.select("Categorize by make"),
        FrameOutcome::Toggled { key: SettingKey::CategorizeMake, value: true }
    );
    h.back();

    let view = h.view();
    assert_eq!(labels(&view)[4..].to_vec(), vec!["Pegassi", "Truffade"]);
}

#[test]
fn optional_main_rows_follow_settings() {
    let mut h = Harness::open_with(MenuSettings {
        spawn_by_name: false,
        list_all_dlcs: false,
        search_menu: false,
        ..MenuSettings::default()
    });
    assert_eq!(labels(&h.view()), vec!["Settings", "Sports", "Super"]);
}

#[test]
fn category_page_holds_only_its_entries() {
    let mut h = Harness::open_default();
    h.select("Super");
    let view = h.view();
    assert_eq!(view.subtitle, "Add-on vehicles");
    assert_eq!(view.entry_keys().map(ModelKey::raw).collect::<Vec<_>>(), vec![101, 102]);
    assert_eq!(labels(&view), vec!["ADDONONE", "ADDONTWO"]);
}

#[test]
fn details_resolved_only_for_highlighted_entry() {
    let mut h = Harness::open_default();
    h.select("Super");
    let view = h.run(1, KeyFrame::new(), None).view;
    assert!(view.rows[0].details.is_empty());
    assert_eq!(view.rows[1].details, vec!["Class: Super"]);
}

#[test]
fn no_category_leaks_entries_from_another() {
    let mut h = Harness::open_with(MenuSettings { merge_dlcs: true, ..MenuSettings::default() });
    h.select("Spawn official DLCs");
    let index = h.view();
    for label in index.row_labels() {
        h.select(label);
        let page = h.view();
        assert_eq!(page.subtitle, "Original + All DLCs");
        for key in page.entry_keys() {
            let entry = h.store.official().iter().find(|e| e.key == key).unwrap();
            assert_eq!(entry.class, label);
        }
        h.back();
    }
}

// ── Official DLCs ───────────────────────────────────────────────────

#[test]
fn merged_and_per_dlc_views_reach_the_same_entries() {
    let mut per_dlc = Harness::open_default();
    per_dlc.select("Spawn official DLCs");
    assert_eq!(per_dlc.machine.current_page(), "officialdlcmenu");
    let split = reachable_entries(&mut per_dlc);

    let mut merged = Harness::open_with(MenuSettings { merge_dlcs: true, ..MenuSettings::default() });
    merged.select("Spawn official DLCs");
    assert_eq!(merged.machine.current_page(), "officialdlcmergedmenu");
    let union = reachable_entries(&mut merged);

    assert_eq!(split, union);
    assert_eq!(union, BTreeSet::from([1, 2, 3, 4]));
}

#[test]
fn dlc_navigation_refreshes_sprites() {
    let mut h = Harness::open_default();
    h.host.calls.clear();
    h.select("Spawn official DLCs");
    h.select("Heists");
    assert_eq!(h.host.calls, vec!["resolve_sprite_info", "resolve_sprite_info"]);

    let view = h.view();
    assert_eq!(view.subtitle, "Sort by DLC");
    assert_eq!(labels(&view), vec!["Sports", "Super"]);

    h.select("Super");
    assert_eq!(h.machine.current_page(), "Heists Super");
    assert_eq!(h.view().subtitle, "Heists");
}

#[test]
fn empty_dlc_reports_unavailable() {
    let mut h = Harness::open_default();
    h.select("Spawn official DLCs");
    h.select("Lowriders");
    let view = h.view();
    assert_eq!(labels(&view), vec!["DLC unavailable."]);
    assert_eq!(
        view.rows[0].details,
        vec![
            "This version of the game does not have the Lowriders DLC content.",
            "Game version: v1.0.1868.0",
        ]
    );
    assert_eq!(h.select("DLC unavailable."), FrameOutcome::Idle);
}

// ── Navigation ──────────────────────────────────────────────────────

#[test]
fn back_walks_history_then_closes() {
    let mut h = Harness::open_default();
    h.select("Spawn official DLCs");
    h.select("Base");
    assert_eq!(h.machine.history().to_vec(), vec!["mainmenu", "officialdlcmenu"]);

    assert_eq!(
        h.back(),
        FrameOutcome::Navigated { from: "Base".into(), to: "officialdlcmenu".into() }
    );
    h.back();
    assert_eq!(h.back(), FrameOutcome::Closed);
    assert!(!h.machine.is_open());
}

#[test]
fn vanished_page_falls_back_to_main() {
    let mut h = Harness::open_default();
    h.select("Sports");
    h.store.replace_addons(vec![CatalogEntry::new(101, "Super", "Pegassi")]);

    let view = h.view();
    assert_eq!(view.id, "mainmenu");
    assert!(h.machine.history().is_empty());
}

#[test]
fn merge_toggle_invalidates_per_dlc_pages() {
    let mut h = Harness::open_default();
    h.select("Spawn official DLCs");
    h.settings.merge_dlcs = true;
    assert_eq!(h.view().id, "mainmenu");
}

#[test]
fn open_refreshes_catalog_and_resets_navigation() {
    let mut h = Harness::open_default();
    h.select("Super");
    h.host.addons.push(CatalogEntry::new(104, "Vans", "Bravado"));
    h.open();

    assert_eq!(h.machine.current_page(), "mainmenu");
    assert!(labels(&h.view()).contains(&"Vans"));
}

// ── Text input and spawning ─────────────────────────────────────────

#[test]
fn manual_spawn_hashes_typed_name() {
    let mut h = Harness::open_default();
    h.type_text(1, "ADDER");
    assert_eq!(h.machine.manual_name(), "ADDER");
    assert!(h.host.suppressed >= 5);

    let outcome = h.press(1, MenuCommand::Activate);
    assert_eq!(outcome, FrameOutcome::Spawned(ModelKey::new(0xB779_A091)));
    assert_eq!(
        h.host.spawned,
        vec![(ModelKey::new(0xB779_A091), SpawnOptions { inside: true, ..SpawnOptions::default() })]
    );
}

#[test]
fn typing_is_ignored_without_capture() {
    let mut h = Harness::open_default();
    h.run(0, KeyFrame::new(), None);
    h.run(0, [Key::Char('A')].into_iter().collect(), None);
    assert_eq!(h.machine.manual_name(), "");
    assert!(!h.machine.is_capturing());
    assert_eq!(h.host.suppressed, 0);
}

#[test]
fn closing_clears_manual_buffer() {
    let mut h = Harness::open_default();
    h.type_text(1, "T20");
    assert_eq!(h.machine.manual_name(), "T20");
    h.back();
    assert_eq!(h.machine.manual_name(), "");
}

#[test]
fn entry_activation_forwards_spawn_options() {
    let mut h = Harness::open_with(MenuSettings { persistent: true, ..MenuSettings::default() });
    h.select("Sports");
    assert_eq!(h.select("ADDONTHREE"), FrameOutcome::Spawned(ModelKey::new(103)));
    assert_eq!(
        h.host.spawned,
        vec![(
            ModelKey::new(103),
            SpawnOptions { inside: true, in_place: false, persistent: true }
        )]
    );
}

// ── Search ──────────────────────────────────────────────────────────

#[test]
fn search_filters_selected_pool() {
    let mut h = Harness::open_default();
    h.select("Search vehicles");
    assert_eq!(h.view().entry_keys().count(), 4);

    h.type_text(1, "z");
    let view = h.run(1, KeyFrame::new(), None).view;
    assert_eq!(view.entry_keys().map(ModelKey::raw).collect::<Vec<_>>(), vec![2]);
    assert_eq!(view.rows[1].details[2], "z");

    assert_eq!(h.press(0, MenuCommand::Adjust(Step::Next)), FrameOutcome::SourceChanged(SearchSource::Addon));
    assert!(h.view().entry_keys().next().is_none());
    assert_eq!(h.settings_store.read().unwrap().search_category, SearchSource::Addon);
}

#[test]
fn reopening_clears_search_query() {
    let mut h = Harness::open_default();
    h.select("Search vehicles");
    h.type_text(1, "zz");
    assert!(h.view().entry_keys().next().is_none());

    h.open();
    assert_eq!(h.machine.search().query.value(), "");
}

// ── Settings page ───────────────────────────────────────────────────

#[test]
fn toggles_persist_immediately() {
    let mut h = Harness::open_default();
    let saves = h.settings_store.save_count();
    h.select("Settings");
    assert_eq!(
        h.select("List all DLCs"),
        FrameOutcome::Toggled { key: SettingKey::ListAllDlcs, value: false }
    );
    assert_eq!(h.settings_store.save_count(), saves + 1);
    assert!(!h.settings_store.read().unwrap().list_all_dlcs);
}

#[test]
fn reload_previews_order() {
    let mut h = Harness::open_default();
    h.select("Settings");
    h.host.calls.clear();
    assert_eq!(h.select("Reload previews"), FrameOutcome::Ran(SettingsCommand::ReloadPreviews));
    assert_eq!(
        h.host.calls,
        vec!["resolve_sprite_info", "clear_image_caches", "store_image_names"]
    );
}

#[test]
fn clean_preview_folder_order() {
    let mut h = Harness::open_default();
    h.select("Settings");
    h.host.calls.clear();
    h.select("Clean up image preview folder");
    assert_eq!(
        h.host.calls,
        vec!["clear_image_caches", "clean_image_directory(true)", "store_image_names"]
    );
}

#[test]
fn clear_persistence_only_when_persistent() {
    let mut h = Harness::open_default();
    h.select("Settings");
    assert!(h.view().position("Clear persistence").is_none());

    h.select("Spawned cars are persistent");
    let view = h.view();
    let row = &view.rows[view.position("Clear persistence").unwrap()];
    assert_eq!(row.details[1], "Persistent vehicles: 3");

    h.select("Clear persistence");
    assert_eq!(h.host.persistent, 0);
}
