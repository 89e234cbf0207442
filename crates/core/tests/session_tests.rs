// ═══════════════════════════════════════════════════════════════════
// Session Tests: TradeSession model, SessionService, input coercion
// ═══════════════════════════════════════════════════════════════════

use trading_calculator_core::models::entry::{Entry, EntryField};
use trading_calculator_core::models::session::{TradeSession, MAX_SAFE_ID};
use trading_calculator_core::models::trade::SavedTrade;
use trading_calculator_core::services::session_service::{
    coerce_amount, parse_amount, SessionService,
};

// ═══════════════════════════════════════════════════════════════════
//  Default State
// ═══════════════════════════════════════════════════════════════════

mod default_state {
    use super::*;

    #[test]
    fn one_blank_entry() {
        let s = TradeSession::default();
        assert_eq!(s.entries, vec![Entry::new(1, 0.0, 0.0)]);
        assert_eq!(s.stop_loss, 0.0);
        assert_eq!(s.next_id, 2);
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
    }

    #[test]
    fn entry_lookup() {
        let s = TradeSession::default();
        assert!(s.entry(1).is_some());
        assert!(s.entry(2).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Add / Remove
// ═══════════════════════════════════════════════════════════════════

mod add_remove {
    use super::*;

    #[test]
    fn add_assigns_next_id() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        assert_eq!(svc.add_entry(&mut s), 2);
        assert_eq!(svc.add_entry(&mut s), 3);
        assert_eq!(s.next_id, 4);
        let ids: Vec<u64> = s.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(s.entries[2], Entry::blank(3));
    }

    #[test]
    fn ids_not_reused_after_remove() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        let id = svc.add_entry(&mut s);
        assert!(svc.remove_entry(&mut s, id));
        let next = svc.add_entry(&mut s);
        assert!(next > id);
        assert_eq!(s.next_id, next + 1);
    }

    #[test]
    fn cannot_remove_last_entry() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        assert!(!svc.remove_entry(&mut s, 1));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        svc.add_entry(&mut s);
        assert!(!svc.remove_entry(&mut s, 42));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn remove_keeps_order() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        svc.add_entry(&mut s);
        svc.add_entry(&mut s);
        assert!(svc.remove_entry(&mut s, 2));
        let ids: Vec<u64> = s.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn exhausted_counter_renumbers_instead_of_overflowing() {
        let svc = SessionService::new();
        let mut s = TradeSession {
            entries: vec![
                Entry::new(7, 10.0, 100.0),
                Entry::new(u64::MAX - 1, 20.0, 200.0),
            ],
            stop_loss: 0.0,
            next_id: u64::MAX,
        };
        assert_eq!(svc.add_entry(&mut s), 3);
        let ids: Vec<u64> = s.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(s.entries[1].price, 20.0);
        assert_eq!(s.next_id, 4);
    }

    #[test]
    fn never_empty_after_many_removes() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        for _ in 0..4 {
            svc.add_entry(&mut s);
        }
        for id in 1..=5 {
            svc.remove_entry(&mut s, id);
        }
        assert_eq!(s.len(), 1);
        assert_eq!(s.entries[0].id, 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Update / Stop Loss / Clear
// ═══════════════════════════════════════════════════════════════════

mod update {
    use super::*;

    #[test]
    fn update_price_and_investment() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        assert!(svc.update_entry(&mut s, 1, EntryField::Price, 100.0));
        assert!(svc.update_entry(&mut s, 1, EntryField::Investment, 1000.0));
        assert_eq!(s.entries[0], Entry::new(1, 100.0, 1000.0));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        assert!(!svc.update_entry(&mut s, 9, EntryField::Price, 100.0));
        assert_eq!(s, TradeSession::default());
    }

    #[test]
    fn invalid_values_become_zero() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        svc.update_entry(&mut s, 1, EntryField::Price, 50.0);
        svc.update_entry(&mut s, 1, EntryField::Price, -3.0);
        assert_eq!(s.entries[0].price, 0.0);
        svc.update_entry(&mut s, 1, EntryField::Investment, f64::NAN);
        assert_eq!(s.entries[0].investment, 0.0);
    }

    #[test]
    fn stop_loss_coerced() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        svc.set_stop_loss(&mut s, 95.5);
        assert_eq!(s.stop_loss, 95.5);
        svc.set_stop_loss(&mut s, f64::INFINITY);
        assert_eq!(s.stop_loss, 0.0);
    }

    #[test]
    fn clear_restores_default() {
        let svc = SessionService::new();
        let mut s = TradeSession::default();
        svc.add_entry(&mut s);
        svc.update_entry(&mut s, 2, EntryField::Price, 10.0);
        svc.set_stop_loss(&mut s, 9.0);
        svc.clear(&mut s);
        assert_eq!(s, TradeSession::default());
    }

    #[test]
    fn field_display() {
        assert_eq!(EntryField::Price.to_string(), "price");
        assert_eq!(EntryField::Investment.to_string(), "investment");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Load From Snapshot
// ═══════════════════════════════════════════════════════════════════

mod load {
    use super::*;

    fn sample_session() -> TradeSession {
        TradeSession {
            entries: vec![Entry::new(1, 100.0, 1000.0), Entry::new(4, 110.0, 2200.0)],
            stop_loss: 95.0,
            next_id: 5,
        }
    }

    #[test]
    fn round_trip_through_snapshot() {
        let svc = SessionService::new();
        let original = sample_session();
        let trade = SavedTrade::from_session(&original, "1", "x", 0);
        let mut s = TradeSession::default();
        svc.load_from(&mut s, &trade);
        assert_eq!(s, original);
    }

    #[test]
    fn loaded_session_does_not_alias_snapshot() {
        let svc = SessionService::new();
        let trade = SavedTrade::from_session(&sample_session(), "1", "x", 0);
        let mut s = TradeSession::default();
        svc.load_from(&mut s, &trade);
        svc.update_entry(&mut s, 1, EntryField::Price, 1.0);
        assert_eq!(trade.entries[0].price, 100.0);
    }

    #[test]
    fn snapshot_does_not_alias_session() {
        let svc = SessionService::new();
        let mut s = sample_session();
        let trade = SavedTrade::from_session(&s, "1", "x", 0);
        svc.update_entry(&mut s, 1, EntryField::Investment, 5.0);
        assert_eq!(trade.entries[0].investment, 1000.0);
    }

    #[test]
    fn empty_snapshot_loads_default() {
        let svc = SessionService::new();
        let mut trade = SavedTrade::from_session(&sample_session(), "1", "x", 0);
        trade.entries.clear();
        let mut s = sample_session();
        svc.load_from(&mut s, &trade);
        assert_eq!(s, TradeSession::default());
    }

    #[test]
    fn oversized_ids_are_renumbered_on_load() {
        let svc = SessionService::new();
        let mut trade = SavedTrade::from_session(&sample_session(), "1", "x", 0);
        trade.entries[1].id = u64::MAX;
        let mut s = TradeSession::default();
        svc.load_from(&mut s, &trade);
        let ids: Vec<u64> = s.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(s.next_id, 3);
        assert_eq!(s.entries[1].investment, 2200.0);
    }

    #[test]
    fn oversized_next_id_is_renumbered_on_load() {
        let svc = SessionService::new();
        let mut trade = SavedTrade::from_session(&sample_session(), "1", "x", 0);
        trade.next_id = MAX_SAFE_ID + 1;
        let mut s = TradeSession::default();
        svc.load_from(&mut s, &trade);
        assert_eq!(s.next_id, 3);
        assert_eq!(svc.add_entry(&mut s), 3);
    }

    #[test]
    fn stale_next_id_is_raised() {
        let svc = SessionService::new();
        let mut trade = SavedTrade::from_session(&sample_session(), "1", "x", 0);
        trade.next_id = 2;
        let mut s = TradeSession::default();
        svc.load_from(&mut s, &trade);
        assert_eq!(s.next_id, 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Input Coercion
// ═══════════════════════════════════════════════════════════════════

mod coercion {
    use super::*;

    #[test]
    fn coerce_keeps_non_negative() {
        assert_eq!(coerce_amount(12.5), 12.5);
        assert_eq!(coerce_amount(0.0), 0.0);
    }

    #[test]
    fn coerce_rejects_negative_and_non_finite() {
        assert_eq!(coerce_amount(-0.01), 0.0);
        assert_eq!(coerce_amount(f64::NAN), 0.0);
        assert_eq!(coerce_amount(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn parse_valid_input() {
        assert_eq!(parse_amount("100.25"), 100.25);
        assert_eq!(parse_amount("  42 "), 42.0);
    }

    #[test]
    fn parse_invalid_input() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-5"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }
}
