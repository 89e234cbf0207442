use crate::models::entry::{Entry, EntryField};
use crate::models::session::{TradeSession, MAX_SAFE_ID};
use crate::models::trade::SavedTrade;

/// Normalize a raw number before it reaches a session.
/// NaN, infinities and negatives all become 0.
#[must_use]
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse user input into a non-negative amount. Anything unparseable is 0.
#[must_use]
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().map(coerce_amount).unwrap_or(0.0)
}

/// Edits a trade session in place.
///
/// Pure business logic, no I/O. Operations that can be no-ops return
/// `true` only when the session actually changed.
#[derive(Debug, Default)]
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Append a blank entry and return its id.
    ///
    /// If the id counter has run past [`MAX_SAFE_ID`], existing entries are
    /// renumbered from 1 first so ids stay unique.
    pub fn add_entry(&self, session: &mut TradeSession) -> u64 {
        if session.next_id >= MAX_SAFE_ID {
            session.renumber();
        }
        let id = session.next_id;
        session.entries.push(Entry::blank(id));
        session.next_id = id + 1;
        id
    }

    /// Remove an entry by id. Refuses to remove the last remaining entry.
    pub fn remove_entry(&self, session: &mut TradeSession, id: u64) -> bool {
        if session.entries.len() <= 1 {
            return false;
        }
        let before = session.entries.len();
        session.entries.retain(|e| e.id != id);
        session.entries.len() != before
    }

    /// Set the price or investment of one entry. Unknown ids are ignored.
    pub fn update_entry(
        &self,
        session: &mut TradeSession,
        id: u64,
        field: EntryField,
        value: f64,
    ) -> bool {
        let value = coerce_amount(value);
        match session.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn set_stop_loss(&self, session: &mut TradeSession, value: f64) {
        session.stop_loss = coerce_amount(value);
    }

    /// Reset to the default single-entry state.
    pub fn clear(&self, session: &mut TradeSession) {
        *session = TradeSession::default();
    }

    /// Replace the session wholesale with a copy of a saved trade.
    ///
    /// Stored data is already validated on read, but the session invariants
    /// are restored here too: an empty entry list becomes the default entry,
    /// ids beyond [`MAX_SAFE_ID`] are renumbered from 1, and `next_id` is
    /// raised above every entry id.
    pub fn load_from(&self, session: &mut TradeSession, trade: &SavedTrade) {
        let mut loaded = trade.to_session();
        if loaded.entries.is_empty() {
            loaded = TradeSession::default();
        }
        for entry in &mut loaded.entries {
            entry.price = coerce_amount(entry.price);
            entry.investment = coerce_amount(entry.investment);
        }
        loaded.stop_loss = coerce_amount(loaded.stop_loss);

        let max_id = loaded.entries.iter().map(|e| e.id).max().unwrap_or(0);
        if max_id >= MAX_SAFE_ID || loaded.next_id > MAX_SAFE_ID {
            loaded.renumber();
        } else if loaded.next_id <= max_id {
            loaded.next_id = max_id + 1;
        }
        *session = loaded;
    }
}
