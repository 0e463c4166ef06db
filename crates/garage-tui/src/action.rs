//! UI actions. Key events are mapped to actions; actions are the only way
//! app state changes.

use std::time::{Duration, Instant};

use garage_core::{Key, MenuCommand};

/// How long a status-line notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub raised: Instant,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
            raised: Instant::now(),
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
            raised: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.raised) >= NOTIFICATION_TTL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Menu ───────────────────────────────────────────────────────
    OpenMenu,
    MoveUp,
    MoveDown,
    /// Queued for the next menu frame.
    Menu(MenuCommand),
    /// A key released into the active text box.
    Type(Key),
}
