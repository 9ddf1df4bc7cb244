//! FEN loading: parse into a zeroed `Board`, commit only on full success.
//! Grounded on the reference engine's `load_fen` (`src/board/load_fen.cpp`).

use super::fen_tables::CHAR_TO_PC;
use super::{Board, CastlingRights, Color, PieceType, castle_bits::*};
use crate::hash::zobrist::zobrist_keys;
use crate::square::{File, Rank, SQ_NONE, Square, square_from_str};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    WrongFieldCount,
    BadBoardPart,
    BadSideToMove,
    BadCastling,
    BadEnPassant,
    BadHalfmoveClock,
    BadKingCount,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FenError::WrongFieldCount => "FEN must have 6 space-separated fields",
            FenError::BadBoardPart => "malformed board part",
            FenError::BadSideToMove => "side to move must be 'w' or 'b'",
            FenError::BadCastling => "malformed castling rights",
            FenError::BadEnPassant => "malformed en passant square",
            FenError::BadHalfmoveClock => "malformed halfmove clock",
            FenError::BadKingCount => "each side must have exactly one king",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for FenError {}

impl Board {
    pub fn load_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::WrongFieldCount);
        }

        let mut b = Board::empty();

        let mut rank = 7i32;
        let mut file = 0i32;
        for ch in fields[0].chars() {
            match ch {
                '/' => {
                    if file != 8 {
                        return Err(FenError::BadBoardPart);
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += ch.to_digit(10).unwrap() as i32;
                }
                c => {
                    if !(0..8).contains(&rank) || !(0..8).contains(&file) {
                        return Err(FenError::BadBoardPart);
                    }
                    if !c.is_ascii() {
                        return Err(FenError::BadBoardPart);
                    }
                    let (color, pt) = CHAR_TO_PC[c as usize].ok_or(FenError::BadBoardPart)?;
                    let sq = Square::make(File(file as u8), Rank(rank as u8));
                    b.put_piece(color, pt, sq);
                    file += 1;
                }
            }
        }
        if rank != 0 || file != 8 {
            return Err(FenError::BadBoardPart);
        }

        b.stm = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadSideToMove),
        };

        let mut cr: CastlingRights = 0;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                cr |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError::BadCastling),
                };
            }
        }
        b.cr = cr;

        b.ep = if fields[3] == "-" {
            SQ_NONE
        } else {
            let sq = square_from_str(fields[3]);
            if !sq.is_ok() {
                return Err(FenError::BadEnPassant);
            }
            sq
        };

        b.half_moves = fields
            .get(4)
            .map(|s| s.parse::<u8>().map_err(|_| FenError::BadHalfmoveClock))
            .transpose()?
            .unwrap_or(0);
        b.plies_from_null = b.half_moves;

        let keys = zobrist_keys();
        if b.ep.is_ok() {
            b.key ^= keys.ep_file[b.ep.file().0 as usize];
        }
        crate::hash::zobrist::xor_castling_rights_delta(&mut b.key, keys, 0, b.cr);
        if b.stm == Color::Black {
            b.key ^= keys.side_to_move;
        }

        if b.pieces_cpt(Color::White, PieceType::King).count_ones() != 1
            || b.pieces_cpt(Color::Black, PieceType::King).count_ones() != 1
        {
            return Err(FenError::BadKingCount);
        }

        b.update_pin_info();
        b.validate();
        Ok(b)
    }

    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::make(File(file), Rank(rank));
                match self.piece_on(sq) {
                    None => empty += 1,
                    Some((c, pt)) => {
                        if empty > 0 {
                            s.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        s.push(super::fen_tables::piece_char(c, pt));
                    }
                }
            }
            if empty > 0 {
                s.push((b'0' + empty) as char);
            }
            if rank != 0 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(if self.stm == Color::White { 'w' } else { 'b' });

        s.push(' ');
        if self.cr == 0 {
            s.push('-');
        } else {
            if self.cr & CASTLE_WK != 0 {
                s.push('K');
            }
            if self.cr & CASTLE_WQ != 0 {
                s.push('Q');
            }
            if self.cr & CASTLE_BK != 0 {
                s.push('k');
            }
            if self.cr & CASTLE_BQ != 0 {
                s.push('q');
            }
        }

        s.push(' ');
        s.push_str(&self.ep.to_string());

        s.push(' ');
        s.push_str(&self.half_moves.to_string());
        s.push_str(" 1");

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_round_trips() {
        let b = Board::start_pos();
        assert_eq!(
            b.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn kiwipete_loads_and_validates() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let b = Board::load_fen(fen).expect("kiwipete should parse");
        assert_eq!(b.to_fen().split(' ').next().unwrap(), fen.split(' ').next().unwrap());
        assert_eq!(b.castling(), CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ);
    }

    #[test]
    fn rejects_short_fen() {
        assert_eq!(Board::load_fen("8/8/8/8/8/8/8/8"), Err(FenError::WrongFieldCount));
    }

    #[test]
    fn rejects_bad_glyph() {
        let fen = "8/8/8/8/8/8/8/7X w - - 0 1";
        assert_eq!(Board::load_fen(fen), Err(FenError::BadBoardPart));
    }

    #[test]
    fn rejects_missing_king() {
        let fen = "8/8/8/8/8/8/8/8 w - - 0 1";
        assert_eq!(Board::load_fen(fen), Err(FenError::BadKingCount));
    }

    #[test]
    fn rejects_non_ascii_glyph_without_panicking() {
        let fen = "8/8/8/8/8/8/8/7\u{e9} w - - 0 1";
        assert_eq!(Board::load_fen(fen), Err(FenError::BadBoardPart));
    }
}
