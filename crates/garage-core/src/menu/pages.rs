// ── Page builders ──
//
// One function per handler. Each reads the live store and settings and
// produces a `PageView`; none of them mutate anything.

use crate::dispatch::render_entry;
use crate::input::TextInput;
use crate::model::{Axis, CatalogEntry};
use crate::search::{SearchState, filter};
use crate::services::Host;
use crate::settings::{MenuSettings, SettingKey};
use crate::store::CatalogStore;

use super::page::{
    FixedPage, PageHandler, addon_category_id, dlc_category_id, dlc_id, merged_category_id,
};
use super::view::{InputField, PageView, Row, RowKind, SettingsCommand};

pub const MENU_TITLE: &str = "Add-on spawner";

/// Read-only inputs shared by every page builder.
pub(super) struct PageInputs<'a> {
    pub store: &'a CatalogStore,
    pub settings: &'a MenuSettings,
    pub host: &'a dyn Host,
    pub search: &'a SearchState,
    pub manual: &'a TextInput,
    pub highlighted: usize,
}

impl PageInputs<'_> {
    fn axis(&self) -> Axis {
        self.settings.axis()
    }

    /// Append entry rows, resolving the info block only for the row that
    /// lands on the highlighted index.
    fn push_entries<'e>(&self, rows: &mut Vec<Row>, entries: impl IntoIterator<Item = &'e CatalogEntry>) {
        for entry in entries {
            let index = rows.len();
            let rendered = render_entry(entry, self.host, || index == self.highlighted);
            rows.push(Row {
                label: rendered.label,
                kind: RowKind::Entry { key: rendered.key },
                details: rendered.details.unwrap_or_default(),
            });
        }
    }
}

fn in_category<'e>(
    entries: &'e [CatalogEntry],
    axis: Axis,
    label: &'e str,
) -> impl Iterator<Item = &'e CatalogEntry> {
    entries.iter().filter(move |entry| entry.label(axis) == label)
}

pub(super) fn build(id: &str, handler: &PageHandler, inputs: &PageInputs<'_>) -> PageView {
    let mut view = match handler {
        PageHandler::Main => main_page(inputs),
        PageHandler::Settings => settings_page(inputs),
        PageHandler::Search => search_page(inputs),
        PageHandler::DlcIndex => dlc_index_page(inputs),
        PageHandler::MergedIndex => merged_index_page(inputs),
        PageHandler::AddonCategory { label } => addon_category_page(inputs, label),
        PageHandler::Dlc { index } => dlc_page(inputs, *index),
        PageHandler::DlcCategory { dlc, label } => dlc_category_page(inputs, *dlc, label),
        PageHandler::MergedCategory { label } => merged_category_page(inputs, label),
    };
    view.id = id.to_owned();
    view
}

fn page(title: impl Into<String>, subtitle: impl Into<String>, rows: Vec<Row>) -> PageView {
    PageView {
        id: String::new(),
        title: title.into(),
        subtitle: subtitle.into(),
        rows,
    }
}

// ── Fixed pages ─────────────────────────────────────────────────────

fn main_page(inputs: &PageInputs<'_>) -> PageView {
    let settings = inputs.settings;
    let mut rows = vec![Row::link("Settings", FixedPage::Settings.id())];

    if settings.spawn_by_name {
        let value = inputs.manual.value().to_owned();
        rows.push(Row {
            label: "Spawn by name".into(),
            details: vec![
                "Use Delete for backspace".into(),
                "Enter car model:".into(),
                value.clone(),
            ],
            kind: RowKind::TextInput { field: InputField::ManualSpawn, value },
        });
    }

    if settings.list_all_dlcs {
        let target = if settings.merge_dlcs {
            FixedPage::OfficialDlcMerged
        } else {
            FixedPage::OfficialDlc
        };
        rows.push(Row::sprite_link("Spawn official DLCs", target.id()));
    }

    if settings.search_menu {
        rows.push(Row::link("Search vehicles", FixedPage::Search.id()));
    }

    rows.extend(
        inputs
            .store
            .addon_labels(inputs.axis())
            .iter()
            .map(|label| Row::link(label.clone(), addon_category_id(label))),
    );

    page(MENU_TITLE, concat!("v", env!("CARGO_PKG_VERSION")), rows)
}

fn settings_page(inputs: &PageInputs<'_>) -> PageView {
    let settings = inputs.settings;
    let mut rows: Vec<Row> = SettingKey::all()
        .map(|key| Row {
            label: key.label().into(),
            kind: RowKind::Toggle { key, value: settings.get(key) },
            details: key.help(settings),
        })
        .collect();

    rows.push(Row {
        label: "Reload previews".into(),
        kind: RowKind::Command(SettingsCommand::ReloadPreviews),
        details: vec!["Use for when you changed an image that's already been loaded.".into()],
    });
    rows.push(Row {
        label: "Clean up image preview folder".into(),
        kind: RowKind::Command(SettingsCommand::CleanPreviewFolder),
        details: vec!["Remove images from the preview folder that aren't detected as add-ons.".into()],
    });

    if settings.persistent {
        rows.push(Row {
            label: "Clear persistence".into(),
            kind: RowKind::Command(SettingsCommand::ClearPersistence),
            details: vec![
                "Clears the persistence on spawned vehicles.".into(),
                format!("Persistent vehicles: {}", inputs.host.persistent_count()),
            ],
        });
    }

    page("Settings", "", rows)
}

fn search_page(inputs: &PageInputs<'_>) -> PageView {
    let search = inputs.search;
    let query = search.query.value();
    let mut rows = vec![
        Row {
            label: "Search in".into(),
            kind: RowKind::SourceSelector { selected: search.source },
            details: Vec::new(),
        },
        Row {
            label: "Search".into(),
            details: vec![
                "Use Delete for backspace".into(),
                "Enter search criteria:".into(),
                query.to_owned(),
                "Press enter to search".into(),
            ],
            kind: RowKind::TextInput { field: InputField::SearchQuery, value: query.to_owned() },
        },
    ];

    let pool = inputs.store.pool(search.source);
    inputs.push_entries(&mut rows, filter(pool, query, inputs.host));

    page("Search", search.source.label(), rows)
}

// ── Generated pages ─────────────────────────────────────────────────

fn addon_category_page(inputs: &PageInputs<'_>, label: &str) -> PageView {
    let mut rows = Vec::new();
    inputs.push_entries(&mut rows, in_category(inputs.store.addons(), inputs.axis(), label));
    page(label, "Add-on vehicles", rows)
}

fn dlc_index_page(inputs: &PageInputs<'_>) -> PageView {
    let rows = inputs
        .store
        .dlcs()
        .iter()
        .map(|dlc| Row::sprite_link(dlc.name.clone(), dlc_id(&dlc.name)))
        .collect();
    page("Official DLC", "", rows)
}

fn dlc_page(inputs: &PageInputs<'_>, index: usize) -> PageView {
    let Some(dlc) = inputs.store.dlc(index) else {
        return page("Official DLC", "Sort by DLC", Vec::new());
    };

    let rows = if dlc.is_available() {
        dlc.labels(inputs.axis())
            .iter()
            .map(|label| Row::sprite_link(label.clone(), dlc_category_id(&dlc.name, label)))
            .collect()
    } else {
        vec![Row::info(
            "DLC unavailable.",
            vec![
                format!("This version of the game does not have the {} DLC content.", dlc.name),
                format!("Game version: {}", inputs.host.game_version()),
            ],
        )]
    };

    page(dlc.name.clone(), "Sort by DLC", rows)
}

fn dlc_category_page(inputs: &PageInputs<'_>, index: usize, label: &str) -> PageView {
    let mut rows = Vec::new();
    let subtitle = match inputs.store.dlc(index) {
        Some(dlc) => {
            inputs.push_entries(&mut rows, in_category(&dlc.entries, inputs.axis(), label));
            dlc.name.clone()
        }
        None => String::new(),
    };
    page(label, subtitle, rows)
}

fn merged_index_page(inputs: &PageInputs<'_>) -> PageView {
    let rows = inputs
        .store
        .official_labels(inputs.axis())
        .iter()
        .map(|label| Row::link(label.clone(), merged_category_id(label)))
        .collect();
    page("Official DLC", "Merged", rows)
}

fn merged_category_page(inputs: &PageInputs<'_>, label: &str) -> PageView {
    let mut rows = Vec::new();
    inputs.push_entries(&mut rows, in_category(inputs.store.official(), inputs.axis(), label));
    page(label, "Original + All DLCs", rows)
}
