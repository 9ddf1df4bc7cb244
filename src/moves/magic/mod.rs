pub mod attacks;
pub mod precompute;
pub mod search;
mod structs;

pub use structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};

use crate::bitboard::Bitboard;
use crate::board::PieceType;
use once_cell::sync::OnceCell;

static TABLES: OnceCell<MagicTables> = OnceCell::new();

/// Returns the process-wide magic attack tables, generating them on first use.
/// Callers only need this to have run before any Board operation; the
/// `OnceCell` makes that automatic on first access.
pub fn tables() -> &'static MagicTables {
    TABLES.get_or_init(precompute::generate_magic_tables_deterministic)
}

#[rustfmt::skip]
const PAWN_ATTACKS_WHITE: [u64; 64] = build_pawn_attacks(true);
#[rustfmt::skip]
const PAWN_ATTACKS_BLACK: [u64; 64] = build_pawn_attacks(false);

const fn build_pawn_attacks(white: bool) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let bb = 1u64 << sq;
        let not_a = bb & !FILE_A_MASK;
        let not_h = bb & !FILE_H_MASK;
        table[sq] = if white {
            ((not_a << 7) | (not_h << 9)) & ALL
        } else {
            ((not_a >> 9) | (not_h >> 7)) & ALL
        };
        sq += 1;
    }
    table
}

const FILE_A_MASK: u64 = 0x0101_0101_0101_0101;
const FILE_H_MASK: u64 = 0x8080_8080_8080_8080;
const ALL: u64 = u64::MAX;

/// Single-step pawn pushes (no double push; the generator derives that).
#[inline(always)]
pub fn pawn_pushes_bb(white: bool, from: crate::square::Square) -> Bitboard {
    let bb = from.bb();
    if white { bb << 8 } else { bb >> 8 }
}

#[inline(always)]
pub fn pawn_attacks_bb(white: bool, sq: crate::square::Square) -> Bitboard {
    if white {
        PAWN_ATTACKS_WHITE[sq.index() as usize]
    } else {
        PAWN_ATTACKS_BLACK[sq.index() as usize]
    }
}

#[inline(always)]
pub fn knight_attacks_bb(sq: crate::square::Square) -> Bitboard {
    attacks::get_knight_attacks(sq.index() as usize)
}

#[inline(always)]
pub fn king_attacks_bb(sq: crate::square::Square) -> Bitboard {
    attacks::get_king_attacks(sq.index() as usize)
}

/// Sliding attacks for `pt` (BISHOP, ROOK, or QUEEN) from `sq` given `occ`.
#[inline(always)]
pub fn attacks_bb(pt: PieceType, sq: crate::square::Square, occ: Bitboard) -> Bitboard {
    let t = tables();
    let s = sq.index() as usize;
    match pt {
        PieceType::Bishop => t.bishop.get_attacks(s, occ),
        PieceType::Rook => t.rook.get_attacks(s, occ),
        PieceType::Queen => t.queen_attacks(s, occ),
        _ => panic!("attacks_bb: {pt:?} is not a slider"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn pawn_attacks_a_file_has_no_wraparound() {
        let a2 = Square::from_index(8);
        let att = pawn_attacks_bb(true, a2);
        assert_eq!(att, Square::from_index(17).bb());
    }

    #[test]
    fn pawn_attacks_h_file_has_no_wraparound() {
        let h2 = Square::from_index(15);
        let att = pawn_attacks_bb(true, h2);
        assert_eq!(att, Square::from_index(22).bb());
    }

    #[test]
    fn knight_and_king_tables_are_nonempty_in_center() {
        let d4 = Square::from_index(27);
        assert_ne!(knight_attacks_bb(d4), 0);
        assert_ne!(king_attacks_bb(d4), 0);
    }

    #[test]
    fn sliding_attacks_match_scan_reference() {
        let d4 = Square::from_index(27);
        let occ = Square::from_index(35).bb(); // d5 blocks north
        let rook = attacks_bb(PieceType::Rook, d4, occ);
        let expected = attacks::rook_attacks_per_square(27, occ);
        assert_eq!(rook, expected);
    }
}
