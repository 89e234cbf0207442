//! Risk metrics derived from a list of entries and one stop-loss.
//!
//! Pure functions: no state, no I/O, never panics. Results are unrounded.

use crate::models::entry::Entry;
use crate::models::summary::TradeSummary;

/// Implied share count of one entry (0 when the price is not positive).
#[must_use]
pub fn shares_of(entry: &Entry) -> f64 {
    entry.shares()
}

/// Dollar loss if every entry is closed at `stop_loss`.
///
/// An entry contributes `(price - stop_loss) * shares` only when its price,
/// its investment and the stop-loss are all positive; otherwise it adds 0.
/// A stop above the entry price yields a negative contribution (a gain).
#[must_use]
pub fn total_loss(entries: &[Entry], stop_loss: f64) -> f64 {
    entries
        .iter()
        .map(|entry| {
            if entry.price > 0.0 && entry.investment > 0.0 && stop_loss > 0.0 {
                (entry.price - stop_loss) * shares_of(entry)
            } else {
                0.0
            }
        })
        .sum()
}

/// Sum of investments across all entries.
#[must_use]
pub fn total_investment(entries: &[Entry]) -> f64 {
    entries.iter().map(|e| e.investment).sum()
}

/// Sum of implied shares across all entries.
#[must_use]
pub fn total_shares(entries: &[Entry]) -> f64 {
    entries.iter().map(shares_of).sum()
}

/// Investment-weighted average entry price: `total_investment / total_shares`,
/// or 0 when there are no shares.
#[must_use]
pub fn average_entry_price(entries: &[Entry]) -> f64 {
    let shares = total_shares(entries);
    if shares > 0.0 {
        total_investment(entries) / shares
    } else {
        0.0
    }
}

/// All four metrics at once.
#[must_use]
pub fn summarize(entries: &[Entry], stop_loss: f64) -> TradeSummary {
    TradeSummary {
        total_loss: total_loss(entries, stop_loss),
        total_investment: total_investment(entries),
        average_entry_price: average_entry_price(entries),
        total_shares: total_shares(entries),
    }
}
