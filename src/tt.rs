//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations,
//! enabling significant search tree pruning.
//!
//! Each slot sits behind its own `parking_lot::Mutex`, so concurrent
//! `probe`/`store` calls from root-parallel workers never observe an entry
//! mixed from two writes. The table takes `&self` everywhere and is shared
//! through an `Arc`.

use std::mem;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub fingerprint: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: BoundType,
    pub best_move: Option<Move>,
    generation: u8,
}

impl TranspositionEntry {
    /// The stored score, if it can stand in for a search of `depth` plies
    /// with window `(alpha, beta)`.
    #[must_use]
    pub fn usable_score(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            BoundType::Exact => Some(self.score),
            BoundType::LowerBound if self.score >= beta => Some(self.score),
            BoundType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

type Slot = Mutex<Option<TranspositionEntry>>;

pub struct TranspositionTable {
    slots: Box<[Slot]>,
    generation: AtomicU8,
}

impl TranspositionTable {
    /// Create a table filling roughly `size_mb` megabytes.
    ///
    /// # Panics
    ///
    /// Panics if `size_mb` is too small to hold a single entry.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entries = size_mb * 1024 * 1024 / mem::size_of::<Slot>();
        Self::with_entries(entries)
    }

    /// Create a table with exactly `entries` slots.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is zero.
    #[must_use]
    pub fn with_entries(entries: usize) -> Self {
        assert!(entries > 0, "transposition table needs at least one entry");
        let slots: Vec<Slot> = (0..entries).map(|_| Mutex::new(None)).collect();
        log::trace!(
            "transposition table: {} entries, {} KiB",
            entries,
            entries * mem::size_of::<Slot>() / 1024
        );
        TranspositionTable {
            slots: slots.into_boxed_slice(),
            generation: AtomicU8::new(0),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, fingerprint: u64) -> &Slot {
        &self.slots[(fingerprint % self.slots.len() as u64) as usize]
    }

    /// Entry stored for exactly this fingerprint, if any.
    #[must_use]
    pub fn probe(&self, fingerprint: u64) -> Option<TranspositionEntry> {
        let entry = *self.slot(fingerprint).lock();
        entry.filter(|entry| entry.fingerprint == fingerprint)
    }

    /// Store a search result.
    ///
    /// An occupied slot is overwritten when it holds the same position, an
    /// entry from an earlier search, or a result searched no deeper than this
    /// one. A re-store without a best move keeps the old one.
    pub fn store(
        &self,
        fingerprint: u64,
        depth: u8,
        score: i32,
        bound: BoundType,
        best_move: Option<Move>,
    ) {
        let generation = self.generation.load(Ordering::Relaxed);
        let mut guard = self.slot(fingerprint).lock();

        let mut best_move = best_move;
        if let Some(old) = guard.as_ref() {
            let same_position = old.fingerprint == fingerprint;
            if !same_position && old.generation == generation && depth < old.depth {
                return;
            }
            if same_position && best_move.is_none() {
                best_move = old.best_move;
            }
        }

        *guard = Some(TranspositionEntry {
            fingerprint,
            depth,
            score,
            bound,
            best_move,
            generation,
        });
    }

    /// Mark the start of a new search; older entries become replaceable.
    pub fn new_search(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns hash table fullness in per mille (0-1000), counting only
    /// entries written by the current search.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let generation = self.generation.load(Ordering::Relaxed);
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample]
            .iter()
            .filter(|slot| (*slot.lock()).is_some_and(|e| e.generation == generation))
            .count();
        (used * 1000 / sample) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&self) {
        for slot in self.slots.iter() {
            *slot.lock() = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, Square};
    use std::sync::Arc;

    fn some_move() -> Move {
        Move::normal(Square::G1, Square::F3, Piece::Knight, None)
    }

    #[test]
    fn test_store_and_probe() {
        let tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 10, 500, BoundType::Exact, Some(some_move()));

        let entry = tt.probe(hash).expect("should find entry");
        assert_eq!(entry.depth, 10);
        assert_eq!(entry.score, 500);
        assert_eq!(entry.bound, BoundType::Exact);
        assert_eq!(entry.best_move, Some(some_move()));
        // Usable for any window at the stored depth or shallower.
        assert_eq!(entry.usable_score(10, -1000, 1000), Some(500));
        assert_eq!(entry.usable_score(3, 600, 700), Some(500));
        assert_eq!(entry.usable_score(11, -1000, 1000), None);
    }

    #[test]
    fn test_no_false_positives() {
        let tt = TranspositionTable::with_entries(1);
        tt.store(7, 4, 10, BoundType::Exact, None);
        // Same slot, different fingerprint.
        assert!(tt.probe(8).is_none());
        assert!(tt.probe(7).is_some());
    }

    #[test]
    fn test_bounds_respect_window() {
        let tt = TranspositionTable::with_entries(16);
        tt.store(1, 5, 300, BoundType::LowerBound, None);
        tt.store(2, 5, -300, BoundType::UpperBound, None);

        let lower = tt.probe(1).unwrap();
        assert_eq!(lower.usable_score(5, 0, 200), Some(300));
        assert_eq!(lower.usable_score(5, 0, 400), None);

        let upper = tt.probe(2).unwrap();
        assert_eq!(upper.usable_score(5, -200, 0), Some(-300));
        assert_eq!(upper.usable_score(5, -400, 0), None);
    }

    #[test]
    fn test_depth_preferred_replacement() {
        let tt = TranspositionTable::with_entries(1);
        tt.store(10, 8, 1, BoundType::Exact, None);
        tt.store(11, 3, 2, BoundType::Exact, None);
        assert_eq!(tt.probe(10).map(|e| e.score), Some(1));
        assert!(tt.probe(11).is_none());

        // Entries from an older search give way to anything.
        tt.new_search();
        tt.store(11, 3, 2, BoundType::Exact, None);
        assert_eq!(tt.probe(11).map(|e| e.score), Some(2));
    }

    #[test]
    fn test_same_position_keeps_best_move() {
        let tt = TranspositionTable::with_entries(4);
        tt.store(5, 6, 40, BoundType::Exact, Some(some_move()));
        tt.store(5, 2, 10, BoundType::UpperBound, None);
        let entry = tt.probe(5).unwrap();
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.best_move, Some(some_move()));
    }

    #[test]
    fn test_clear_and_hashfull() {
        let tt = TranspositionTable::with_entries(10);
        for fp in 0..5 {
            tt.store(fp, 1, 0, BoundType::Exact, None);
        }
        assert_eq!(tt.hashfull_per_mille(), 500);
        tt.clear();
        assert_eq!(tt.hashfull_per_mille(), 0);
        assert!(tt.probe(3).is_none());
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn test_zero_capacity_panics() {
        let _ = TranspositionTable::with_entries(0);
    }

    #[test]
    fn test_concurrent_stores_never_mix_fields() {
        let tt = Arc::new(TranspositionTable::with_entries(8));
        std::thread::scope(|scope| {
            for worker in 0..4i32 {
                let tt = Arc::clone(&tt);
                scope.spawn(move || {
                    for round in 0..1000i32 {
                        let fp = (round % 8) as u64;
                        let value = worker * 10_000 + round;
                        tt.store(fp, 1, value, BoundType::Exact, None);
                        if let Some(e) = tt.probe(fp) {
                            // score encodes the writer; depth and bound are shared
                            assert_eq!(e.depth, 1);
                            assert_eq!(e.score % 10_000 % 8, (e.fingerprint % 8) as i32);
                        }
                    }
                });
            }
        });
    }
}
