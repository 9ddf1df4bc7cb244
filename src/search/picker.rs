//! Staged move picker: TT move first, then tactical moves, then quiet moves.
//!
//! Selection is FIFO within a stage; `score_tactical`/`score_nontactical` only
//! strip already-tried moves out of the freshly generated buffer. They are
//! the seam a search crate would replace with MVV-LVA/SEE/history ordering
//! without touching the stage machine itself.

use crate::board::Board;
use crate::moves::movegen::{self, NON_TACTICAL, TACTICAL};
use crate::moves::types::{MOVE_NONE, Move};
use arrayvec::ArrayVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerStage {
    TtMove,
    InitTactical,
    Tactical,
    InitNonTactical,
    NonTactical,
}

pub struct MovePicker {
    stage: PickerStage,
    excluded: ArrayVec<Move, 1>,
    buf: ArrayVec<Move, 256>,
    cur: usize,
}

impl MovePicker {
    /// Picker seeded with a TT move: yields it first (unvalidated — the
    /// caller must run `Board::is_valid_move` before playing it), then
    /// excludes it from the tactical/non-tactical stages that follow.
    pub fn with_tt_move(tt_move: Move) -> Self {
        let mut excluded = ArrayVec::new();
        excluded.push(tt_move);
        Self {
            stage: PickerStage::TtMove,
            excluded,
            buf: ArrayVec::new(),
            cur: 0,
        }
    }

    /// Picker with no TT move: starts straight at the tactical stage
    /// (used for quiescence search).
    pub fn without_tt_move() -> Self {
        Self {
            stage: PickerStage::InitTactical,
            excluded: ArrayVec::new(),
            buf: ArrayVec::new(),
            cur: 0,
        }
    }

    fn strip_excluded(&mut self) {
        let mut i = 0;
        while i < self.buf.len() {
            if self.excluded.contains(&self.buf[i]) {
                self.buf.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn select(&mut self) -> Move {
        if self.cur == self.buf.len() {
            return MOVE_NONE;
        }
        let m = self.buf[self.cur];
        self.cur += 1;
        m
    }

    /// Returns the next move, or `MOVE_NONE` once every stage is exhausted.
    pub fn next(&mut self, board: &Board) -> Move {
        loop {
            match self.stage {
                PickerStage::TtMove => {
                    self.stage = PickerStage::InitTactical;
                    if let Some(&tt_move) = self.excluded.first() {
                        return tt_move;
                    }
                }
                PickerStage::InitTactical => {
                    self.buf.clear();
                    self.cur = 0;
                    movegen::generate::<TACTICAL>(board, &mut self.buf);
                    self.strip_excluded();
                    self.stage = PickerStage::Tactical;
                }
                PickerStage::Tactical => {
                    let m = self.select();
                    if m != MOVE_NONE {
                        return m;
                    }
                    self.stage = PickerStage::InitNonTactical;
                }
                PickerStage::InitNonTactical => {
                    self.buf.clear();
                    self.cur = 0;
                    movegen::generate::<NON_TACTICAL>(board, &mut self.buf);
                    self.strip_excluded();
                    self.stage = PickerStage::NonTactical;
                }
                PickerStage::NonTactical => {
                    return self.select();
                }
            }
        }
    }
}
