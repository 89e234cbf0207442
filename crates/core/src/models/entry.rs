use serde::{Deserialize, Serialize};

/// Which numeric field of an entry is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    /// Entry price per share/unit
    Price,
    /// Dollar amount committed at that price
    Investment,
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryField::Price => write!(f, "price"),
            EntryField::Investment => write!(f, "investment"),
        }
    }
}

/// One capital allocation at one entry price.
///
/// Share count is derived, never stored: see [`Entry::shares`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique within a single trade session
    pub id: u64,

    /// Entry price per share (non-negative)
    pub price: f64,

    /// Amount invested at this price (non-negative)
    pub investment: f64,
}

impl Entry {
    pub fn new(id: u64, price: f64, investment: f64) -> Self {
        Self {
            id,
            price,
            investment,
        }
    }

    /// A freshly added entry: zero price, zero investment.
    pub fn blank(id: u64) -> Self {
        Self::new(id, 0.0, 0.0)
    }

    /// Implied share count: `investment / price`, or 0 when the price is not positive.
    #[must_use]
    pub fn shares(&self) -> f64 {
        if self.price > 0.0 {
            self.investment / self.price
        } else {
            0.0
        }
    }

    pub(crate) fn set(&mut self, field: EntryField, value: f64) {
        match field {
            EntryField::Price => self.price = value,
            EntryField::Investment => self.investment = value,
        }
    }
}
