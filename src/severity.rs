//! Severity levels and their display labels.

use std::fmt;

/// Short display labels, index-aligned with [`Severity`].
pub const LABELS: [&str; 6] = ["FTL", "SYS", "ERR", "WNG", "INF", "DBG"];

/// Message severity. Lower value = more urgent.
///
/// `Fatal` and `System` always pass the gate; the remaining levels are
/// emitted only when the threshold is at least as verbose.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal = 0,
    System = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::System,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// Threshold a fresh logger starts with.
    pub const DEFAULT_THRESHOLD: Severity = Severity::Warning;

    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// Map a raw integer back to a severity (None when outside the table).
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Severity::Fatal),
            1 => Some(Severity::System),
            2 => Some(Severity::Error),
            3 => Some(Severity::Warning),
            4 => Some(Severity::Info),
            5 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Like [`Severity::from_i32`], but only for values accepted as a threshold.
    pub const fn threshold_from_i32(value: i32) -> Option<Self> {
        if value < 1 || value >= LABELS.len() as i32 {
            return None;
        }
        Self::from_i32(value)
    }

    /// Fatal and System messages are never suppressed.
    #[inline]
    pub const fn bypasses_gate(self) -> bool {
        (self as u8) <= (Severity::System as u8)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
