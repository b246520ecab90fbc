//! Filesystem event classification.

use notify::event::{EventKind, ModifyKind};

/// What the watch loop should do with a filesystem event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// Content or directory entries changed: reload.
    Change,
    /// Attribute/permission change or plain access: ignore.
    Noise,
}

impl EventClass {
    pub fn is_change(&self) -> bool {
        matches!(self, EventClass::Change)
    }
}

/// Classify an event kind.
///
/// Only chmod-style metadata changes and accesses are noise. Unknown kinds
/// (`Any`, `Other`) count as changes.
pub fn classify(kind: &EventKind) -> EventClass {
    match kind {
        EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Access(_) => EventClass::Noise,
        EventKind::Create(_)
        | EventKind::Modify(_)
        | EventKind::Remove(_)
        | EventKind::Any
        | EventKind::Other => EventClass::Change,
    }
}
