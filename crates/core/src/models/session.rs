use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Id of the single entry a fresh session starts with.
pub const FIRST_ENTRY_ID: u64 = 1;

/// Largest id a stored record may carry (2^53 - 1, the largest integer a
/// JSON number round-trips exactly through a browser).
pub const MAX_SAFE_ID: u64 = 9_007_199_254_740_991;

/// The live working set: the entries being edited plus one shared stop-loss.
///
/// Never empty. `next_id` is strictly greater than every id issued so far,
/// so ids are not reused after a removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSession {
    /// Entries in display order
    pub entries: Vec<Entry>,

    /// Stop-loss price shared across all entries
    pub stop_loss: f64,

    /// Id assigned to the next added entry
    pub next_id: u64,
}

impl Default for TradeSession {
    fn default() -> Self {
        Self {
            entries: vec![Entry::blank(FIRST_ENTRY_ID)],
            stop_loss: 0.0,
            next_id: FIRST_ENTRY_ID + 1,
        }
    }
}

impl TradeSession {
    /// Look up an entry by id.
    #[must_use]
    pub fn entry(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Reassign ids `1..=n` in display order and reset `next_id` to `n + 1`.
    pub(crate) fn renumber(&mut self) {
        let mut next = FIRST_ENTRY_ID;
        for entry in &mut self.entries {
            entry.id = next;
            next += 1;
        }
        self.next_id = next;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
