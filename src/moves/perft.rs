use crate::board::Board;
use crate::moves::movegen::{self, LEGAL};
use crate::moves::types::{Move, MoveType};
use crate::output::engine_println;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow nodes
const MAX_PERFT_DEPTH: usize = 20; // support perft up to depth 20

pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn zero() -> Self {
        Self {
            nodes: 0,
            captures: 0,
            ep_captures: 0,
            castles: 0,
            promotions: 0,
            checks: 0,
            checkmates: 0,
        }
    }

    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

fn create_move_buffer_array() -> [Vec<Move>; MAX_PERFT_DEPTH] {
    std::array::from_fn(|_| Vec::with_capacity(64))
}

fn legal_moves_into(board: &Board, buf: &mut Vec<Move>) {
    buf.clear();
    movegen::generate::<LEGAL>(board, buf);
}

fn perft_recursive(board: &Board, depth: u32, ply: usize, move_buffers: &mut [Vec<Move>]) -> u64 {
    if depth == 0 {
        return 1;
    }

    legal_moves_into(board, &mut move_buffers[ply]);
    let moves = move_buffers[ply].clone();

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft_recursive(&board.do_move(mv), depth - 1, ply + 1, move_buffers))
        .sum()
}

#[instrument(skip(board), fields(depth))]
pub fn perft(board: &Board, depth: u32) -> u64 {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut move_buffers = create_move_buffer_array();
    perft_recursive(board, depth, 0, &mut move_buffers)
}

#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &Board, depth: u32) -> u64 {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut move_buffers = create_move_buffer_array();
    legal_moves_into(board, &mut move_buffers[0]);
    let root_moves = move_buffers[0].clone();

    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = root_moves.len(), "divide: root legal moves");
    }

    let mut total = 0;
    for mv in root_moves {
        let child = board.do_move(mv);
        let count = if depth == 1 { 1 } else { perft_recursive(&child, depth - 1, 1, &mut move_buffers) };

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root child total");
        }

        engine_println!("{mv}: {count}");
        total += count;
    }

    debug!(depth, total, "divide: total");
    engine_println!("Total: {total}");
    total
}

fn perft_count_recursive(board: &Board, depth: u32, ply: usize, out: &mut PerftCounters, move_buffers: &mut [Vec<Move>]) {
    if depth == 0 {
        out.nodes += 1;
        if board.in_check() {
            out.checks += 1;
        }

        legal_moves_into(board, &mut move_buffers[ply]);
        if move_buffers[ply].is_empty() && board.in_check() {
            out.checkmates += 1;
        }
        return;
    }

    legal_moves_into(board, &mut move_buffers[ply]);
    let moves = move_buffers[ply].clone();

    for mv in moves {
        let is_capture = board.piece_on(mv.to()).is_some() || mv.move_type() == MoveType::EnPassant;
        if is_capture {
            out.captures += 1;
            if mv.move_type() == MoveType::EnPassant {
                out.ep_captures += 1;
            }
        }
        if mv.move_type() == MoveType::Castling {
            out.castles += 1;
        }
        if mv.move_type() == MoveType::Promotion {
            out.promotions += 1;
        }

        perft_count_recursive(&board.do_move(mv), depth - 1, ply + 1, out, move_buffers);
    }
}

pub fn perft_count_with_breakdown(board: &Board, depth: u32, out: &mut PerftCounters) {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut move_buffers = create_move_buffer_array();
    perft_count_recursive(board, depth, 0, out, &mut move_buffers);
}

pub fn perft_divide_with_breakdown(board: &Board, depth: u32) -> Vec<(Move, PerftCounters)> {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut move_buffers = create_move_buffer_array();
    legal_moves_into(board, &mut move_buffers[0]);
    let root_moves = move_buffers[0].clone();

    let mut out = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let child = board.do_move(mv);
        let mut pc = PerftCounters::zero();
        if depth > 1 {
            perft_count_recursive(&child, depth - 1, 1, &mut pc, &mut move_buffers);
        } else {
            pc.nodes = 1;
        }
        out.push((mv, pc));
    }
    out
}
