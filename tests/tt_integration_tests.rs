//! Exercises the transposition table against real positions reached by
//! `Board::do_move`, rather than synthetic keys, and checks `extract_pv`
//! against an actual stored line.

use vantage_core::board::Board;
use vantage_core::moves::types::{Move, MoveType};
use vantage_core::search::tt::{Bound, TranspositionTable};

fn sq(s: &str) -> vantage_core::square::Square {
    vantage_core::square::square_from_str(s)
}

#[test]
fn store_then_probe_round_trips_for_positions_reached_by_do_move() {
    let mut tt = TranspositionTable::new(1).unwrap();
    let b0 = Board::start_pos();
    let b1 = b0.do_move(Move::new(sq("e2"), sq("e4"), MoveType::Normal));
    let b2 = b1.do_move(Move::new(sq("c7"), sq("c5"), MoveType::Normal));

    let best = Move::new(sq("g1"), sq("f3"), MoveType::Normal);
    tt.store(b2.key(), best, 35, Bound::Exact, 8, 0, false);

    let entry = tt.probe(b2.key()).expect("stored entry must be found");
    assert_eq!(entry.best_move(), best);
    assert_eq!(entry.score(0), 35);

    assert!(tt.probe(b1.key()).is_none());
}

#[test]
fn extract_pv_follows_a_chain_of_stored_moves() {
    let mut tt = TranspositionTable::new(1).unwrap();
    let b0 = Board::start_pos();
    let m1 = Move::new(sq("e2"), sq("e4"), MoveType::Normal);
    let b1 = b0.do_move(m1);
    let m2 = Move::new(sq("e7"), sq("e5"), MoveType::Normal);
    let b2 = b1.do_move(m2);
    let m3 = Move::new(sq("g1"), sq("f3"), MoveType::Normal);

    tt.store(b0.key(), m1, 0, Bound::Exact, 1, 0, false);
    tt.store(b1.key(), m2, 0, Bound::Exact, 1, 0, false);
    tt.store(b2.key(), m3, 0, Bound::Exact, 1, 0, false);

    let pv = tt.extract_pv(&b0, 10);
    assert_eq!(pv, vec![m1, m2, m3]);
}

#[test]
fn storing_the_same_key_twice_keeps_a_single_entry_with_the_latest_data() {
    let mut tt = TranspositionTable::new(1).unwrap();
    let b = Board::start_pos();
    let shallow = Move::new(sq("e2"), sq("e4"), MoveType::Normal);
    let deep = Move::new(sq("d2"), sq("d4"), MoveType::Normal);

    tt.store(b.key(), shallow, 10, Bound::Exact, 2, 0, false);
    tt.store(b.key(), deep, 20, Bound::Exact, 9, 0, false);

    let e = tt.probe(b.key()).unwrap();
    assert_eq!(e.best_move(), deep);
    assert_eq!(e.depth(), 9);
}

#[test]
fn clear_removes_every_stored_entry() {
    let mut tt = TranspositionTable::new(1).unwrap();
    let b = Board::start_pos();
    tt.store(b.key(), Move::new(sq("e2"), sq("e4"), MoveType::Normal), 0, Bound::Exact, 1, 0, false);
    tt.clear();
    assert!(tt.probe(b.key()).is_none());
}
