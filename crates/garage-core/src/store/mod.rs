// ── Catalog store ──
//
// Collections and their derived label sets, replaced in place on refresh.

mod catalog_store;
pub mod labels;
mod refresh;

pub use catalog_store::CatalogStore;
pub use labels::{AxisLabels, LabelSet, build_label_set};
