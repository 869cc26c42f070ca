//! Move ordering: TT move, captures by MVV-LVA, killers, then history.

use crate::types::{Move, MoveList, ScoredMoveList, MAX_PLY};

pub(crate) const TT_MOVE_SCORE: i32 = 1 << 20;
pub(crate) const CAPTURE_BASE_SCORE: i32 = 200_000;
pub(crate) const KILLER_SCORES: [i32; 2] = [90_000, 80_000];

/// Most valuable victim first, least valuable attacker breaking ties.
/// Promotions add the value of the promoted piece.
#[inline]
pub(crate) fn mvv_lva(mv: Move) -> i32 {
    let victim = mv.captured().map_or(0, |p| p.value());
    let promotion = mv.promotion_piece().map_or(0, |p| p.value());
    10 * victim - mv.piece().value() + promotion
}

/// Two quiet cutoff moves per ply, most recent first.
pub(crate) struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    pub fn primary(&self, ply: usize) -> Option<Move> {
        self.slots.get(ply).and_then(|row| row[0])
    }

    pub fn secondary(&self, ply: usize) -> Option<Move> {
        self.slots.get(ply).and_then(|row| row[1])
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        if row[0] != Some(mv) {
            row[1] = row[0];
            row[0] = Some(mv);
        }
    }
}

/// Quiet-move cutoff counts indexed by `from * 64 + to`.
pub(crate) struct HistoryTable {
    entries: [i32; 4096],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable { entries: [0; 4096] }
    }

    pub fn score(&self, mv: Move) -> i32 {
        self.entries[mv.from_to_index()]
    }

    /// Credit a quiet move that caused a beta cutoff at `depth`.
    ///
    /// When the entry passes `max` the whole table decays by `shift`.
    pub fn reward(&mut self, mv: Move, depth: u8, max: i32, shift: u32) {
        let depth = i32::from(depth);
        let entry = &mut self.entries[mv.from_to_index()];
        *entry = entry.saturating_add(depth * depth);
        if *entry > max {
            self.decay(shift);
        }
    }

    pub fn decay(&mut self, shift: u32) {
        for entry in &mut self.entries {
            *entry >>= shift;
        }
    }
}

/// Score every move for best-first selection.
pub(crate) fn order_moves(
    moves: &MoveList,
    tt_move: Option<Move>,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> ScoredMoveList {
    let killer_moves = [killers.primary(ply), killers.secondary(ply)];
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if tt_move == Some(mv) {
            TT_MOVE_SCORE
        } else if mv.is_capture() || mv.is_promotion() {
            CAPTURE_BASE_SCORE + mvv_lva(mv)
        } else if let Some(slot) = killer_moves.iter().position(|&k| k == Some(mv)) {
            KILLER_SCORES[slot]
        } else {
            history.score(mv)
        };
        scored.push(mv, score);
    }
    scored
}
