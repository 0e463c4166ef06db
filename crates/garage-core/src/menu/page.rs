// ── Page identity and dispatch ──
//
// Fixed pages have hard-coded ids. Every other page id is derived from a
// label or DLC name, so the set of valid ids is only known once the
// catalog is loaded. `PageRegistry` is rebuilt each frame from the live
// label sets and maps every valid id to a handler descriptor.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{trace, warn};

use crate::settings::MenuSettings;
use crate::store::CatalogStore;

/// Pages whose identity does not depend on the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedPage {
    Main,
    Settings,
    Search,
    OfficialDlc,
    OfficialDlcMerged,
}

impl FixedPage {
    pub fn id(self) -> &'static str {
        match self {
            Self::Main => "mainmenu",
            Self::Settings => "settingsmenu",
            Self::Search => "searchmenu",
            Self::OfficialDlc => "officialdlcmenu",
            Self::OfficialDlcMerged => "officialdlcmergedmenu",
        }
    }
}

/// Id of an add-on category page: the label itself.
pub fn addon_category_id(label: &str) -> String {
    label.to_owned()
}

/// Id of a DLC page: the DLC name itself.
pub fn dlc_id(name: &str) -> String {
    name.to_owned()
}

/// Id of a category page inside one DLC.
pub fn dlc_category_id(dlc: &str, label: &str) -> String {
    format!("{dlc} {label}")
}

/// Id of a category page in merged-DLC mode.
pub fn merged_category_id(label: &str) -> String {
    format!("dlc_{label}")
}

/// What a page id resolves to for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageHandler {
    Main,
    Settings,
    Search,
    /// One row per DLC pack (non-merged mode).
    DlcIndex,
    /// One row per label across all DLCs (merged mode).
    MergedIndex,
    AddonCategory { label: String },
    Dlc { index: usize },
    DlcCategory { dlc: usize, label: String },
    MergedCategory { label: String },
}

/// Every page id valid for the current catalog and settings.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: IndexMap<String, PageHandler>,
}

impl PageRegistry {
    pub fn build(store: &CatalogStore, settings: &MenuSettings) -> Self {
        let axis = settings.axis();
        let mut registry = Self::default();

        registry.register(FixedPage::Main.id().to_owned(), PageHandler::Main);
        registry.register(FixedPage::Settings.id().to_owned(), PageHandler::Settings);
        registry.register(FixedPage::Search.id().to_owned(), PageHandler::Search);

        for label in store.addon_labels(axis) {
            registry.register(
                addon_category_id(label),
                PageHandler::AddonCategory { label: label.clone() },
            );
        }

        if settings.merge_dlcs {
            registry.register(
                FixedPage::OfficialDlcMerged.id().to_owned(),
                PageHandler::MergedIndex,
            );
            for label in store.official_labels(axis) {
                registry.register(
                    merged_category_id(label),
                    PageHandler::MergedCategory { label: label.clone() },
                );
            }
        } else {
            registry.register(FixedPage::OfficialDlc.id().to_owned(), PageHandler::DlcIndex);
            for (index, dlc) in store.dlcs().iter().enumerate() {
                registry.register(dlc_id(&dlc.name), PageHandler::Dlc { index });
                for label in dlc.labels(axis) {
                    registry.register(
                        dlc_category_id(&dlc.name, label),
                        PageHandler::DlcCategory { dlc: index, label: label.clone() },
                    );
                }
            }
        }

        trace!(%axis, merged = settings.merge_dlcs, pages = registry.len(), "page registry built");
        registry
    }

    /// First registration of an id wins. A later page with the same id
    /// is unreachable, so the collision is logged.
    fn register(&mut self, id: String, handler: PageHandler) {
        match self.pages.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(handler);
            }
            Entry::Occupied(slot) => {
                warn!(
                    id = %slot.key(),
                    kept = ?slot.get(),
                    dropped = ?handler,
                    "page id collision, keeping the first page"
                );
            }
        }
    }

    pub fn resolve(&self, id: &str) -> Option<&PageHandler> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
