// ── Menu navigation ──
//
// Page identity, rendering and the per-frame state machine that ties the
// catalog store, settings and host together.

mod machine;
pub mod page;
mod pages;
pub mod view;

pub use machine::{FrameInput, FrameOutcome, FrameResult, MenuCommand, MenuContext, MenuMachine, Step};
pub use page::{FixedPage, PageHandler, PageRegistry};
pub use pages::MENU_TITLE;
pub use view::{InputField, PageView, Row, RowKind, SettingsCommand};
