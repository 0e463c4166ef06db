// ── Model identity ──
//
// Every catalog entry is addressed by the 32-bit hash the game computes
// from its model name. `ModelKey` wraps that hash; `joaat` computes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModelKey ────────────────────────────────────────────────────────

/// Opaque identifying key of a spawnable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelKey(u32);

impl ModelKey {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Key for a model name, hashed exactly as given (case-insensitively).
    pub fn from_name(name: &str) -> Self {
        Self(joaat(name))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<u32> for ModelKey {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl FromStr for ModelKey {
    type Err = std::convert::Infallible;

    /// Accepts `0x`-prefixed hex, plain decimal, or a model name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if let Ok(raw) = u32::from_str_radix(hex, 16) {
                return Ok(Self(raw));
            }
        }
        if let Ok(raw) = s.parse::<u32>() {
            return Ok(Self(raw));
        }
        Ok(Self::from_name(s))
    }
}

// ── Hashing ─────────────────────────────────────────────────────────

/// Jenkins one-at-a-time hash over the ASCII-lowercased bytes of `input`.
pub fn joaat(input: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in input.bytes() {
        hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
