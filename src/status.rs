//! Terminal/draw classification for a position, given its search-path history.

use crate::board::Board;
use crate::history::History;
use crate::moves::movegen::{self, LEGAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    DrawSeventyFiveMove,
    DrawDeadPosition,
    DrawRepetition,
    DrawFiftyMove,
    Stalemate,
    Checkmate,
}

/// Classifies `board`'s status, consulting `history` for repetition.
///
/// Priority (highest to lowest): seventy-five-move rule (automatic),
/// insufficient material, repetition, fifty-move rule (claimable), then the
/// move-based outcomes checkmate/stalemate/in-play.
pub fn position_status(board: &Board, history: &History) -> GameStatus {
    if board.half_moves() >= 150 {
        return GameStatus::DrawSeventyFiveMove;
    }
    if board.is_material_draw() {
        return GameStatus::DrawDeadPosition;
    }
    if history.is_repetition(board) {
        return GameStatus::DrawRepetition;
    }
    if board.half_moves() >= 100 {
        return GameStatus::DrawFiftyMove;
    }

    let mut legal = Vec::with_capacity(64);
    movegen::generate::<LEGAL>(board, &mut legal);
    if legal.is_empty() {
        if board.in_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else {
        GameStatus::InPlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_is_in_play() {
        let b = Board::start_pos();
        let h = History::new();
        assert_eq!(position_status(&b, &h), GameStatus::InPlay);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let b = Board::load_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mated = b.do_move(crate::moves::types::Move::new(
            crate::square::square_from_str("a1"),
            crate::square::square_from_str("a8"),
            crate::moves::types::MoveType::Normal,
        ));
        let h = History::new();
        assert_eq!(position_status(&mated, &h), GameStatus::Checkmate);
    }

    #[test]
    fn king_vs_king_is_dead_position() {
        let b = Board::load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let h = History::new();
        assert_eq!(position_status(&b, &h), GameStatus::DrawDeadPosition);
    }

    #[test]
    fn stalemate_with_no_legal_moves_and_not_in_check() {
        let b = Board::load_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let h = History::new();
        assert_eq!(position_status(&b, &h), GameStatus::Stalemate);
    }
}
