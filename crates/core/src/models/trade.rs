use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::session::TradeSession;

/// Reserved id of the auto-saved working copy.
pub const ACTIVE_TRADE_ID: &str = "active";

/// Display name of the auto-saved working copy.
pub const ACTIVE_TRADE_NAME: &str = "Active Trade";

/// A named, timestamped copy of a trade session.
///
/// The serialized field names (`id`, `name`, `entries`, `stopLoss`,
/// `nextId`, `timestamp`) are the persisted format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTrade {
    /// `"active"` for the working copy, a millisecond timestamp string otherwise
    pub id: String,

    /// Non-empty display name
    pub name: String,

    /// Owned copy of the session's entries at save time
    pub entries: Vec<Entry>,

    pub stop_loss: f64,

    pub next_id: u64,

    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl SavedTrade {
    /// Snapshot a session under the given id and name.
    /// The entry list is cloned, so later edits to the session don't leak in.
    pub fn from_session(
        session: &TradeSession,
        id: impl Into<String>,
        name: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entries: session.entries.clone(),
            stop_loss: session.stop_loss,
            next_id: session.next_id,
            timestamp,
        }
    }

    /// The record mirrored into the active slot.
    pub fn active(session: &TradeSession, timestamp: i64) -> Self {
        Self::from_session(session, ACTIVE_TRADE_ID, ACTIVE_TRADE_NAME, timestamp)
    }

    /// Rebuild a session from this snapshot (deep copy).
    #[must_use]
    pub fn to_session(&self) -> TradeSession {
        TradeSession {
            entries: self.entries.clone(),
            stop_loss: self.stop_loss,
            next_id: self.next_id,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id == ACTIVE_TRADE_ID
    }

    /// Sum of the investments, as shown in history listings.
    #[must_use]
    pub fn total_investment(&self) -> f64 {
        self.entries.iter().map(|e| e.investment).sum()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Save time as a UTC datetime, if the timestamp is in range.
    #[must_use]
    pub fn saved_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}
