//! Queue entry data structures.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use rfcast_core::CommandCode;

/// One pending transmission: a command code and the bridge URL that
/// carries its raw payload. Created when a command is accepted, consumed
/// exactly once when dispatched, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// Unique id, for log correlation only.
    pub id: Uuid,
    /// The command this entry transmits.
    pub code: CommandCode,
    /// Fully assembled bridge GET target.
    pub url: String,
    /// When the entry was accepted.
    pub queued_at: DateTime<Utc>,
}

impl QueueEntry {
    /// Create an entry for a freshly assembled payload.
    pub fn new(code: CommandCode, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            url,
            queued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfcast_core::fan;

    #[test]
    fn entries_get_distinct_ids() {
        let a = QueueEntry::new(fan::OFF, "http://bridge/cm".to_string());
        let b = QueueEntry::new(fan::OFF, "http://bridge/cm".to_string());
        assert_ne!(a.id, b.id);
        assert_eq!(a.code, b.code);
    }
}
