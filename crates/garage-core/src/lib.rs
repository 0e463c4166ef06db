//! Catalog classification, live search and menu navigation for an in-game
//! vehicle spawner.
//!
//! The crate is host-agnostic: everything that touches the game (scanning
//! add-ons, name lookups, spawning, control suppression) sits behind the
//! traits in [`services`], and the menu is driven one frame at a time.
//!
//! - **[`CatalogStore`]**: Add-on entries, official DLC packs and the
//!   union pool, with label sets derived along both classification axes.
//!   Fully rebuilt from a [`CatalogProvider`] on every menu open.
//!
//! - **[`MenuMachine`]**: Page navigation over fixed and generated page
//!   ids. Each [`frame()`](MenuMachine::frame) rebuilds the page registry,
//!   feeds the active text box, renders a [`PageView`] and applies one
//!   [`MenuCommand`].
//!
//! - **Text input** ([`input`]): Pure per-frame evaluation of released
//!   keys against a buffer, plus the capture wrapper that suppresses host
//!   controls.
//!
//! - **Search** ([`search`]): Case-insensitive substring filter across
//!   five name fields of each entry.
//!
//! - **Dispatch** ([`dispatch`]): Two-phase entry rendering and spawn
//!   activation.

pub mod dispatch;
pub mod error;
pub mod input;
pub mod menu;
pub mod model;
pub mod search;
pub mod services;
pub mod settings;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use input::{Key, KeyFrame, TextInput, evaluate_input};
pub use menu::{
    FixedPage, FrameInput, FrameOutcome, FrameResult, MenuCommand, MenuContext, MenuMachine,
    PageView, Row, RowKind, SettingsCommand, Step,
};
pub use model::{Axis, CatalogEntry, Dlc, DlcDefinition, ModelKey};
pub use search::{SearchSource, SearchState};
pub use services::{CatalogProvider, ControlSuppressor, Host, NameResolver, PreviewCache, Spawner};
pub use settings::{MemorySettingsStore, MenuSettings, SettingKey, SettingsStore, SpawnOptions};
pub use store::CatalogStore;
