// ── Core error types ──
//
// The menu itself never fails a frame: these errors only surface from the
// seams around it (settings persistence, catalog loading) and are logged
// and absorbed by the caller.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog errors ───────────────────────────────────────────────
    #[error("Catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    // ── Settings errors ──────────────────────────────────────────────
    #[error("Failed to save settings: {message}")]
    SettingsSave { message: String },

    #[error("Failed to read settings: {message}")]
    SettingsRead { message: String },
}
