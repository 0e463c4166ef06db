// ── Menu state machine ──
//
// Owns navigation (current page + history), the two text boxes and the
// search pool selector. Each frame it rebuilds the page registry, feeds
// the active text box, renders the current page and applies at most one
// command against the highlighted row.

use tracing::{debug, info, warn};

use crate::dispatch;
use crate::input::{KeyFrame, TextInput};
use crate::model::ModelKey;
use crate::search::{SearchSource, SearchState};
use crate::services::Host;
use crate::settings::{MenuSettings, SettingKey, SettingsStore};
use crate::store::CatalogStore;

use super::page::{FixedPage, PageHandler, PageRegistry};
use super::pages::{self, PageInputs};
use super::view::{InputField, PageView, Row, RowKind, SettingsCommand};

/// Everything the machine borrows from its owner for one call.
pub struct MenuContext<'a> {
    pub store: &'a mut CatalogStore,
    pub settings: &'a mut MenuSettings,
    pub settings_store: &'a mut dyn SettingsStore,
    pub host: &'a mut dyn Host,
}

/// Direction for left/right adjustment of a selector row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

/// A navigation command against the highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Activate,
    Adjust(Step),
    Back,
}

/// Input for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Index of the highlighted row on the current page.
    pub highlighted: usize,
    /// Keys released since the previous frame.
    pub keys: KeyFrame,
    pub command: Option<MenuCommand>,
}

/// Side effect a frame produced, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameOutcome {
    #[default]
    Idle,
    Navigated { from: String, to: String },
    Spawned(ModelKey),
    Toggled { key: SettingKey, value: bool },
    Ran(SettingsCommand),
    SourceChanged(SearchSource),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameResult {
    /// The page as rendered this frame, before the command was applied.
    pub view: PageView,
    pub outcome: FrameOutcome,
}

#[derive(Debug, Clone)]
pub struct MenuMachine {
    current: String,
    history: Vec<String>,
    search: SearchState,
    manual: TextInput,
    open: bool,
}

impl Default for MenuMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuMachine {
    pub fn new() -> Self {
        Self {
            current: FixedPage::Main.id().to_owned(),
            history: Vec::new(),
            search: SearchState::default(),
            manual: TextInput::new(),
            open: false,
        }
    }

    pub fn current_page(&self) -> &str {
        &self.current
    }

    /// Pages below the current one, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn manual_name(&self) -> &str {
        self.manual.value()
    }

    /// Whether a text box wants raw key input on the next frame.
    pub fn is_capturing(&self) -> bool {
        self.manual.is_capturing() || self.search.query.is_capturing()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Persist and reload settings, refresh the catalog and land on the
    /// main page with an empty search.
    pub fn open(&mut self, ctx: &mut MenuContext<'_>) {
        sync_settings(ctx);
        ctx.store.refresh(&mut *ctx.host);

        self.search.query.clear();
        self.search.source = ctx.settings.search_category;
        self.current = FixedPage::Main.id().to_owned();
        self.history.clear();
        self.open = true;
        info!(
            addons = ctx.store.addons().len(),
            dlcs = ctx.store.dlcs().len(),
            "menu opened"
        );
    }

    /// Drop the manual spawn buffer and release input capture.
    pub fn close(&mut self) {
        self.manual.clear();
        self.manual.set_capturing(false);
        self.search.query.set_capturing(false);
        self.open = false;
        debug!("menu closed");
    }

    // ── Frame ────────────────────────────────────────────────────────

    pub fn frame(&mut self, ctx: &mut MenuContext<'_>, input: &FrameInput) -> FrameResult {
        let registry = PageRegistry::build(ctx.store, ctx.settings);
        let handler = self.resolve_current(&registry);

        // Capture flags are left over from the previous frame's highlight.
        match handler {
            PageHandler::Main => self.manual.poll(&input.keys, &mut *ctx.host),
            PageHandler::Search => self.search.query.poll(&input.keys, &mut *ctx.host),
            _ => {}
        }

        let view = pages::build(
            &self.current,
            &handler,
            &PageInputs {
                store: &*ctx.store,
                settings: &*ctx.settings,
                host: &*ctx.host,
                search: &self.search,
                manual: &self.manual,
                highlighted: input.highlighted,
            },
        );

        let focused = view.rows.get(input.highlighted);
        let focused_on = |field| focused.is_some_and(|row| row.is_input(field));
        self.manual
            .set_capturing(handler == PageHandler::Main && focused_on(InputField::ManualSpawn));
        self.search
            .query
            .set_capturing(handler == PageHandler::Search && focused_on(InputField::SearchQuery));

        let outcome = match (input.command, focused) {
            (Some(MenuCommand::Back), _) => self.back(),
            (Some(MenuCommand::Activate), Some(row)) => self.activate(row, ctx),
            (Some(MenuCommand::Adjust(step)), Some(row)) => self.adjust(row, step, ctx),
            _ => FrameOutcome::Idle,
        };

        FrameResult { view, outcome }
    }

    /// Handler for the current page, falling back to the main page when
    /// the id no longer exists.
    fn resolve_current(&mut self, registry: &PageRegistry) -> PageHandler {
        if let Some(handler) = registry.resolve(&self.current) {
            return handler.clone();
        }
        warn!(page = %self.current, "page no longer exists, returning to main menu");
        self.current = FixedPage::Main.id().to_owned();
        self.history.clear();
        PageHandler::Main
    }

    fn navigate(&mut self, target: &str) -> FrameOutcome {
        let from = std::mem::replace(&mut self.current, target.to_owned());
        self.history.push(from.clone());
        debug!(%from, to = target, "navigate");
        FrameOutcome::Navigated { from, to: target.to_owned() }
    }

    fn back(&mut self) -> FrameOutcome {
        match self.history.pop() {
            Some(previous) => {
                let from = std::mem::replace(&mut self.current, previous);
                FrameOutcome::Navigated { from, to: self.current.clone() }
            }
            None => {
                self.close();
                FrameOutcome::Closed
            }
        }
    }

    fn activate(&mut self, row: &Row, ctx: &mut MenuContext<'_>) -> FrameOutcome {
        match &row.kind {
            RowKind::Link { target, refresh_sprites } => {
                if *refresh_sprites {
                    ctx.host.resolve_sprite_info();
                }
                self.navigate(target)
            }
            RowKind::Toggle { key, .. } => {
                let value = ctx.settings.toggle(*key);
                persist(ctx);
                FrameOutcome::Toggled { key: *key, value }
            }
            RowKind::Command(command) => {
                run_command(*command, ctx);
                FrameOutcome::Ran(*command)
            }
            RowKind::SourceSelector { selected } => self.select_source(selected.next(), ctx),
            RowKind::TextInput { field: InputField::ManualSpawn, value } => {
                let key = ModelKey::from_name(value);
                dispatch::activate(key, &mut *ctx.host, ctx.settings.spawn_options());
                FrameOutcome::Spawned(key)
            }
            RowKind::Entry { key } => {
                dispatch::activate(*key, &mut *ctx.host, ctx.settings.spawn_options());
                FrameOutcome::Spawned(*key)
            }
            // Results are already live; confirming the query box does nothing.
            RowKind::TextInput { field: InputField::SearchQuery, .. } | RowKind::Info => FrameOutcome::Idle,
        }
    }

    fn adjust(&mut self, row: &Row, step: Step, ctx: &mut MenuContext<'_>) -> FrameOutcome {
        let RowKind::SourceSelector { selected } = row.kind else {
            return FrameOutcome::Idle;
        };
        let source = match step {
            Step::Prev => selected.prev(),
            Step::Next => selected.next(),
        };
        self.select_source(source, ctx)
    }

    fn select_source(&mut self, source: SearchSource, ctx: &mut MenuContext<'_>) -> FrameOutcome {
        self.search.source = source;
        ctx.settings.search_category = source;
        persist(ctx);
        FrameOutcome::SourceChanged(source)
    }
}

fn persist(ctx: &mut MenuContext<'_>) {
    if let Err(e) = ctx.settings_store.save(ctx.settings) {
        warn!(error = %e, "failed to persist settings");
    }
}

/// Save the live settings, then adopt whatever the store reads back.
fn sync_settings(ctx: &mut MenuContext<'_>) {
    persist(ctx);
    match ctx.settings_store.read() {
        Ok(settings) => *ctx.settings = settings,
        Err(e) => warn!(error = %e, "failed to read settings, keeping current values"),
    }
}

fn run_command(command: SettingsCommand, ctx: &mut MenuContext<'_>) {
    info!(?command, "settings command");
    match command {
        SettingsCommand::ReloadPreviews => {
            ctx.host.resolve_sprite_info();
            ctx.host.clear_image_caches();
            ctx.host.store_image_names();
        }
        SettingsCommand::CleanPreviewFolder => {
            ctx.host.clear_image_caches();
            ctx.host.clean_image_directory(true);
            ctx.host.store_image_names();
        }
        SettingsCommand::ClearPersistence => ctx.host.clear_persistent_vehicles(),
    }
}
