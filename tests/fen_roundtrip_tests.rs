//! FEN load/save round trips across a spread of positions (promotions,
//! castling rights subsets, en-passant availability).

use vantage_core::board::Board;

const FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "4k3/8/8/8/8/8/4P3/4K3 w - - 0 50",
    "r3k2r/8/8/8/8/8/8/R3K2R b Qk - 3 10",
];

#[test]
fn every_fen_round_trips_through_load_and_to_fen() {
    for fen in FENS {
        let b = Board::load_fen(fen).unwrap_or_else(|e| panic!("{fen} failed to load: {e}"));
        let back = b.to_fen();
        let b2 = Board::load_fen(&back).unwrap_or_else(|e| panic!("re-parse of {back}: {e}"));
        assert_eq!(b.key(), b2.key(), "round trip changed position key for {fen}");
        assert_eq!(back, b2.to_fen());
    }
}

#[test]
fn rejects_malformed_fens() {
    assert!(Board::load_fen("not a fen").is_err());
    assert!(Board::load_fen("8/8/8/8/8/8/8/8 w KQkq - 0 1").is_err()); // no kings
    assert!(Board::load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR z KQkq - 0 1").is_err());
}
