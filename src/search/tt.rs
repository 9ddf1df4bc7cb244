//! Bucketed, aging transposition table.
//!
//! Each stored entry packs into two 64-bit words, `key` and `data`; what's
//! actually written to the bucket is `key ^ data`. A probe recovers the
//! original key by XORing the stored word against a freshly read `data` and
//! comparing to the live key — a torn concurrent write fails that check and
//! the probe reports a miss instead of returning garbage. No locking.

use crate::board::Board;
use crate::error::TtError;
use crate::moves::types::{MOVE_NONE, Move};

pub const MATE_BOUND: i32 = 30_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    None = 0,
    Alpha = 1,
    Beta = 2,
    Exact = 3,
}

impl Bound {
    fn from_u8(v: u8) -> Bound {
        match v & 0b11 {
            1 => Bound::Alpha,
            2 => Bound::Beta,
            3 => Bound::Exact,
            _ => Bound::None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    data: u64,
}

const MOVE_SHIFT: u32 = 0;
const SCORE_SHIFT: u32 = 16;
const DEPTH_SHIFT: u32 = 32;
const BOUND_SHIFT: u32 = 40;
const AVOID_NULL_SHIFT: u32 = 42;
const AGE_SHIFT: u32 = 43;

fn pack_data(mv: Move, score: i16, depth: u8, bound: Bound, avoid_null: bool, age: u8) -> u64 {
    (mv.0 as u64) << MOVE_SHIFT
        | ((score as u16) as u64) << SCORE_SHIFT
        | (depth as u64) << DEPTH_SHIFT
        | ((bound as u64) & 0b11) << BOUND_SHIFT
        | (avoid_null as u64) << AVOID_NULL_SHIFT
        | (age as u64) << AGE_SHIFT
}

impl TTEntry {
    fn empty() -> Self {
        TTEntry { key: 0, data: 0 }
    }

    pub fn best_move(&self) -> Move {
        Move((self.data >> MOVE_SHIFT) as u16)
    }

    pub fn depth(&self) -> u8 {
        (self.data >> DEPTH_SHIFT) as u8
    }

    pub fn bound(&self) -> Bound {
        Bound::from_u8((self.data >> BOUND_SHIFT) as u8)
    }

    pub fn avoid_null(&self) -> bool {
        (self.data >> AVOID_NULL_SHIFT) & 1 != 0
    }

    fn age(&self) -> u8 {
        (self.data >> AGE_SHIFT) as u8
    }

    fn set_age(&mut self, age: u8) {
        self.data = (self.data & !(0xFFu64 << AGE_SHIFT)) | ((age as u64) << AGE_SHIFT);
    }

    /// Score normalized back to `ply`: mate scores are stored relative to
    /// the root and must be shifted to the retrieving node's ply.
    pub fn score(&self, ply: i32) -> i32 {
        let raw = (self.data >> SCORE_SHIFT) as u16 as i16 as i32;
        if raw > MATE_BOUND {
            raw - ply
        } else if raw < -MATE_BOUND {
            raw + ply
        } else {
            raw
        }
    }
}

struct Bucket {
    entries: [TTEntry; Bucket::N],
}

impl Bucket {
    const N: usize = 4;

    fn empty() -> Self {
        Bucket {
            entries: [TTEntry::empty(); Self::N],
        }
    }
}

pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    age: u8,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable {
            buckets: vec![Bucket::empty()],
            age: 0,
        }
    }
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Result<Self, TtError> {
        let mut tt = TranspositionTable::default();
        tt.resize(size_mb)?;
        Ok(tt)
    }

    /// Reallocates to (approximately) `size_mb` megabytes, rounded down to a
    /// whole number of buckets. Discards all existing contents.
    pub fn resize(&mut self, size_mb: usize) -> Result<(), TtError> {
        let bucket_bytes = std::mem::size_of::<Bucket>();
        let num_buckets = (size_mb * 1024 * 1024) / bucket_bytes;
        if num_buckets == 0 {
            return Err(TtError::TooSmall {
                requested_mb: size_mb,
            });
        }
        self.buckets = (0..num_buckets).map(|_| Bucket::empty()).collect();
        self.age = 0;
        Ok(())
    }

    pub fn clear(&mut self) {
        for b in self.buckets.iter_mut() {
            *b = Bucket::empty();
        }
        self.age = 0;
    }

    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    fn bucket_index(&self, key: u64) -> usize {
        (key as usize) % self.buckets.len()
    }

    /// Non-binding cache-warming hint.
    pub fn prefetch(&self, key: u64) {
        let idx = self.bucket_index(key);
        std::hint::black_box(&self.buckets[idx]);
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        let idx = self.bucket_index(key);
        for e in &self.buckets[idx].entries {
            if e.key ^ e.data == key {
                let mut out = *e;
                out.key = key;
                out.set_age(self.age);
                return Some(out);
            }
        }
        None
    }

    #[allow(clippy::too_many_arguments)]
    pub fn store(
        &mut self,
        key: u64,
        mv: Move,
        score: i32,
        bound: Bound,
        depth: u8,
        ply: i32,
        avoid_null: bool,
    ) {
        let normalized = if score > MATE_BOUND {
            score + ply
        } else if score < -MATE_BOUND {
            score - ply
        } else {
            score
        };
        let score16 = normalized.clamp(i16::MIN as i32, i16::MAX as i32) as i16;

        let age = self.age;
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];

        let replace = bucket
            .entries
            .iter()
            .position(|e| e.key ^ e.data == key)
            .or_else(|| {
                bucket
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.age() != age)
                    .min_by_key(|(_, e)| e.depth())
                    .map(|(i, _)| i)
            })
            .unwrap_or_else(|| {
                bucket
                    .entries
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, e)| e.depth())
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });

        let data = pack_data(mv, score16, depth, bound, avoid_null, age);
        bucket.entries[replace] = TTEntry {
            key: key ^ data,
            data,
        };
    }

    /// Fraction (per mille) of sampled buckets holding a live entry from the
    /// current search generation.
    pub fn hashfull(&self) -> u64 {
        let sample = self.buckets.len().min(1000);
        let mut cnt = 0u64;
        for bucket in &self.buckets[..sample] {
            for e in &bucket.entries {
                if e.depth() != 0 && e.age() == self.age {
                    cnt += 1;
                }
            }
        }
        cnt * 1000 / (sample as u64 * Bucket::N as u64)
    }

    /// Chases TT moves from `root`, stopping at the first miss or the first
    /// move no longer valid in the position it would be played in.
    pub fn extract_pv(&self, root: &Board, max: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max);
        let mut board = root.clone();
        while pv.len() < max {
            let Some(entry) = self.probe(board.key()) else {
                break;
            };
            let mv = entry.best_move();
            if mv == MOVE_NONE || !board.is_valid_move(mv) {
                break;
            }
            board = board.do_move(mv);
            pv.push(mv);
        }
        pv
    }
}
