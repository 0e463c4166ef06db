//! Application core: event loop, key mapping and the bridge between
//! terminal events and menu frames.

use std::collections::HashMap;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use garage_config::FileSettingsStore;
use garage_core::dispatch::display_name;
use garage_core::{
    CatalogStore, FrameInput, FrameOutcome, FrameResult, Key, KeyFrame, MenuCommand, MenuContext,
    MenuMachine, MenuSettings, PageView, SettingsCommand, Spawner, Step,
};

use crate::action::{Action, Notification, NotificationLevel};
use crate::event::{Event, EventReader, Rates};
use crate::host::TerminalHost;
use crate::menu_view;
use crate::theme;
use crate::tui::Tui;

/// Spawns listed on the idle screen.
const RECENT_SPAWNS: usize = 10;

/// Map a key press to an action.
///
/// While a text box holds capture, printable keys become typed keys and
/// only arrows, Enter, Esc and Ctrl+C keep their navigation meaning.
pub fn map_key(key: KeyEvent, menu_open: bool, capturing: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
    }

    if !menu_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('m') => Some(Action::OpenMenu),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => return Some(Action::MoveUp),
        KeyCode::Down => return Some(Action::MoveDown),
        KeyCode::Enter => return Some(Action::Menu(MenuCommand::Activate)),
        KeyCode::Esc => return Some(Action::Menu(MenuCommand::Back)),
        _ => {}
    }

    if capturing {
        return match key.code {
            KeyCode::Char(' ') => Some(Action::Type(Key::Space)),
            KeyCode::Char('-') => Some(Action::Type(Key::Underscore)),
            KeyCode::Char(c) => Some(Action::Type(Key::Char(c))),
            KeyCode::Delete => Some(Action::Type(Key::Delete)),
            KeyCode::Backspace => Some(Action::Type(Key::Backspace)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Menu(MenuCommand::Adjust(Step::Prev))),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Menu(MenuCommand::Adjust(Step::Next))),
        KeyCode::Backspace => Some(Action::Menu(MenuCommand::Back)),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

pub struct App {
    machine: MenuMachine,
    store: CatalogStore,
    settings: MenuSettings,
    settings_store: FileSettingsStore,
    host: TerminalHost,
    /// Highlighted row per page id.
    highlight: HashMap<String, usize>,
    /// Keys typed since the last frame.
    pending_keys: KeyFrame,
    pending_command: Option<MenuCommand>,
    view: PageView,
    /// A text box suppressed controls during the last frame.
    typing: bool,
    notification: Option<Notification>,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(host: TerminalHost, settings: MenuSettings, settings_store: FileSettingsStore) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            machine: MenuMachine::new(),
            store: CatalogStore::new(),
            settings,
            settings_store,
            host,
            highlight: HashMap::new(),
            pending_keys: KeyFrame::new(),
            pending_command: None,
            view: PageView::default(),
            typing: false,
            notification: None,
            running: true,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.open_menu();

        let mut events = EventReader::spawn(Rates::default());
        info!(
            catalog = %self.host.catalog_path().display(),
            settings = %self.settings_store.path().display(),
            "event loop started"
        );

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            let action = match event {
                Event::Key(key) => map_key(key, self.machine.is_open(), self.machine.is_capturing()),
                Event::Tick => Some(Action::Tick),
                Event::Render | Event::Resize => Some(Action::Render),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = action == Action::Render;
                self.process_action(action);
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!(spawned = self.host.spawn_log().len(), "event loop ended");
        Ok(())
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Tick => {
                if self.notification.as_ref().is_some_and(|n| n.expired(Instant::now())) {
                    self.notification = None;
                }
            }
            Action::Render => self.step_menu(),
            Action::OpenMenu => self.open_menu(),
            Action::MoveUp => self.move_highlight(false),
            Action::MoveDown => self.move_highlight(true),
            Action::Menu(command) => {
                self.pending_command.get_or_insert(command);
            }
            Action::Type(key) => self.pending_keys.release(key),
        }
    }

    // ── Menu bridge ──────────────────────────────────────────────────

    fn run_frame(&mut self, input: &FrameInput) -> FrameResult {
        let mut ctx = MenuContext {
            store: &mut self.store,
            settings: &mut self.settings,
            settings_store: &mut self.settings_store,
            host: &mut self.host,
        };
        self.machine.frame(&mut ctx, input)
    }

    fn open_menu(&mut self) {
        let mut ctx = MenuContext {
            store: &mut self.store,
            settings: &mut self.settings,
            settings_store: &mut self.settings_store,
            host: &mut self.host,
        };
        self.machine.open(&mut ctx);
        self.highlight.clear();
        self.pending_keys.clear();
        self.pending_command = None;
    }

    fn current_highlight(&self) -> usize {
        self.highlight.get(self.machine.current_page()).copied().unwrap_or(0)
    }

    /// Run one menu frame with everything queued since the last one.
    fn step_menu(&mut self) {
        if !self.machine.is_open() {
            self.pending_keys.clear();
            self.pending_command = None;
            return;
        }

        let input = FrameInput {
            highlighted: self.current_highlight(),
            keys: std::mem::take(&mut self.pending_keys),
            command: self.pending_command.take(),
        };
        let FrameResult { mut view, outcome } = self.run_frame(&input);

        if outcome != FrameOutcome::Idle {
            self.report(&outcome);
            if self.machine.is_open() {
                // Redraw straight away so the result of the command shows.
                let input = FrameInput { highlighted: self.current_highlight(), ..FrameInput::default() };
                view = self.run_frame(&input).view;
            }
        }

        self.typing = self.host.take_suppressed();
        let last = view.rows.len().saturating_sub(1);
        let slot = self.highlight.entry(view.id.clone()).or_insert(0);
        *slot = (*slot).min(last);
        self.view = view;
    }

    fn move_highlight(&mut self, down: bool) {
        let len = self.view.rows.len();
        if len == 0 {
            return;
        }
        let slot = self.highlight.entry(self.view.id.clone()).or_insert(0);
        *slot = match (down, *slot) {
            (true, i) => (i + 1) % len,
            (false, 0) => len - 1,
            (false, i) => i - 1,
        };
    }

    fn report(&mut self, outcome: &FrameOutcome) {
        let notification = match outcome {
            FrameOutcome::Spawned(key) => {
                Notification::success(format!("Spawned {}", display_name(&self.host, *key)))
            }
            FrameOutcome::Toggled { key, value } => {
                Notification::info(format!("{}: {}", key.label(), if *value { "on" } else { "off" }))
            }
            FrameOutcome::Ran(command) => Notification::success(match command {
                SettingsCommand::ReloadPreviews => "Previews reloaded",
                SettingsCommand::CleanPreviewFolder => "Preview folder cleaned",
                SettingsCommand::ClearPersistence => "Persistent vehicles cleared",
            }),
            FrameOutcome::SourceChanged(source) => {
                Notification::info(format!("Searching {}", source.label().to_lowercase()))
            }
            FrameOutcome::Closed => Notification::info("Menu closed"),
            FrameOutcome::Navigated { .. } | FrameOutcome::Idle => return,
        };
        debug!(message = %notification.message, "notify");
        self.notification = Some(notification);
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        if self.machine.is_open() {
            let highlighted = self.highlight.get(&self.view.id).copied().unwrap_or(0);
            menu_view::render(frame, body, &self.view, highlighted, self.typing);
        } else {
            self.render_idle(frame, body);
        }
        self.render_status_bar(frame, status);
    }

    fn render_idle(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("open the menu", theme::key_hint()),
            ]),
            Line::from(Span::styled(self.catalog_summary(), theme::key_hint())),
            Line::from(""),
        ];
        lines.extend(self.host.spawn_log().iter().rev().take(RECENT_SPAWNS).map(|record| {
            let name = record.model.clone().unwrap_or_else(|| record.key.to_string());
            let flags = if record.options.persistent { " (persistent)" } else { "" };
            Line::from(Span::styled(
                format!("  {}  {name}{flags}", record.at.format("%H:%M:%S")),
                theme::row_normal(),
            ))
        }));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
            .title(Line::from(Span::styled(" Garage ", theme::title_style())));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn catalog_summary(&self) -> String {
        let age = self
            .store
            .data_age()
            .map_or_else(|| "never".to_owned(), |age| format!("{}s ago", age.num_seconds()));
        format!(
            "  {} add-ons, {} official vehicles in {} DLC packs, refreshed {age}",
            self.store.addons().len(),
            self.store.official().len(),
            self.store.dlcs().len(),
        )
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        if self.typing {
            spans.push(Span::styled("INPUT ", theme::input_active()));
        }
        match &self.notification {
            Some(n) => {
                let color = match n.level {
                    NotificationLevel::Success => theme::SUCCESS_GREEN,
                    NotificationLevel::Info => theme::NEON_CYAN,
                };
                spans.push(Span::styled(n.message.clone(), Style::default().fg(color)));
            }
            None => spans.push(Span::styled(
                "↑/↓ move  ⏎ select  ←/→ change  esc back  q quit",
                theme::key_hint(),
            )),
        }
        spans.push(Span::styled(
            format!("  │ persistent: {}", self.host.persistent_count()),
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
