// ── Domain model ──
//
// Catalog entries, their keys, and the DLC packs that group them.

pub mod dlc;
pub mod entry;
pub mod key;

pub use dlc::{Dlc, DlcDefinition};
pub use entry::{Axis, CatalogEntry};
pub use key::{ModelKey, joaat};
