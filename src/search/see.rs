//! Static Exchange Evaluation: the net material outcome of the capture
//! sequence a side can force on one square, without playing the moves out.

use crate::bitboard::BitboardExt;
use crate::board::{Board, Color, PieceType};
use crate::moves::types::{Move, MoveType};
use crate::square::Square;

fn piece_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::Pawn => 100,
        PieceType::Knight => 320,
        PieceType::Bishop => 330,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 20_000,
    }
}

pub trait SeeExt {
    /// Is the static exchange evaluation of `m` at least `threshold`?
    fn see_ge(&self, m: Move, threshold: i32) -> bool;
}

impl SeeExt for Board {
    fn see_ge(&self, m: Move, threshold: i32) -> bool {
        let from = m.from();
        let to = m.to();

        let next_victim_pt = if m.move_type() == MoveType::EnPassant {
            PieceType::Pawn
        } else {
            match self.piece_on(to) {
                Some((_, pt)) => pt,
                None => return threshold <= 0,
            }
        };

        let mut value = piece_value(next_victim_pt);
        if m.move_type() == MoveType::Promotion {
            value += piece_value(m.promotion_type()) - piece_value(PieceType::Pawn);
        }

        if value < threshold {
            return false;
        }

        let mut next_attacker_pt = if m.move_type() == MoveType::Promotion {
            m.promotion_type()
        } else {
            self.piece_on(from).expect("mover must be on its from square").1
        };

        let mut gain = [0i32; 32];
        let mut d = 0usize;
        gain[d] = value;

        let mut occupancy = self.pieces();
        occupancy &= !from.bb();
        if m.move_type() == MoveType::EnPassant {
            let captured_sq = Square::from_index(if self.side_to_move() == Color::White {
                to.index() - 8
            } else {
                to.index() + 8
            });
            occupancy &= !captured_sq.bb();
        }

        let mut attackers = self.attackers_to(to, occupancy) & occupancy;
        let mut side = !self.side_to_move();

        loop {
            let side_attackers = attackers & self.pieces_c(side);
            let attacker_sq = next_least_valuable(self, side_attackers, side);
            let Some(attacker_sq) = attacker_sq else {
                break;
            };
            d += 1;
            if d >= gain.len() {
                break;
            }

            attackers &= !attacker_sq.bb();
            occupancy &= !attacker_sq.bb();

            if matches!(
                next_attacker_pt,
                PieceType::Bishop | PieceType::Rook | PieceType::Queen
            ) {
                attackers = self.attackers_to(to, occupancy) & occupancy;
            }

            gain[d] = piece_value(next_attacker_pt) - gain[d - 1];
            next_attacker_pt = self
                .piece_on(attacker_sq)
                .map(|(_, pt)| pt)
                .unwrap_or(next_attacker_pt);
            side = !side;
        }

        while d > 0 {
            gain[d - 1] = -(-gain[d - 1]).max(gain[d]);
            d -= 1;
        }
        gain[0] >= threshold
    }
}

/// Least valuable attacker of `side` among `attackers`, or `None`.
fn next_least_valuable(board: &Board, attackers: u64, side: Color) -> Option<Square> {
    for pt in [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ] {
        let subset = attackers & board.pieces_cpt(side, pt);
        if subset != 0 {
            return Some(Square::from_index(subset.lsb()));
        }
    }
    None
}
