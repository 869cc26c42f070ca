//! Magic bitboards for sliding pieces.
//!
//! For every square the relevant occupancy (the rays minus the board edge) is
//! multiplied by a magic constant and shifted down to a dense table index.
//! Magics are found at startup by a seeded random search and each candidate is
//! checked against every occupancy subset of its mask before it is accepted,
//! so two occupancies share an index only when their attack sets are equal.

use rand::rngs::StdRng;
use rand::Rng;

use super::Slider;
use crate::types::{Bitboard, Square};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn directions(slider: Slider) -> &'static [(i8, i8); 4] {
    match slider {
        Slider::Bishop => &BISHOP_DIRECTIONS,
        Slider::Rook => &ROOK_DIRECTIONS,
    }
}

/// Attacks found by walking each ray until the first blocker (inclusive).
///
/// Slow reference used to fill the magic tables and to check them in tests.
pub(crate) fn ray_attacks(sq: Square, slider: Slider, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in directions(slider) {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            attacks |= Bitboard::from_square(next);
            if occupancy.contains(next) {
                break;
            }
            cur = next;
        }
    }
    attacks
}

/// Squares whose occupancy can change the attack set from `sq`.
///
/// The last square of each ray is left out: a piece there never blocks anything.
pub(crate) fn relevant_mask(sq: Square, slider: Slider) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &(dr, df) in directions(slider) {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            if next.offset(dr, df).is_none() {
                break;
            }
            mask |= Bitboard::from_square(next);
            cur = next;
        }
    }
    mask
}

#[derive(Clone, Copy, Debug)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupancy: Bitboard) -> usize {
        let relevant = occupancy.0 & self.mask.0;
        self.offset + (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Per-square magic entries and one flat attack array shared by all squares.
pub(crate) struct MagicTable {
    entries: Vec<MagicEntry>,
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    pub(crate) fn build(slider: Slider, rng: &mut StdRng) -> Self {
        let mut entries = Vec::with_capacity(64);
        let mut attacks = Vec::new();

        for sq in Square::all() {
            let mask = relevant_mask(sq, slider);
            let bits = mask.popcount();
            let shift = 64 - bits;

            // Carry-Rippler walk over every subset of the mask
            let mut occupancies = Vec::with_capacity(1 << bits);
            let mut reference = Vec::with_capacity(1 << bits);
            let mut subset = 0u64;
            loop {
                occupancies.push(subset);
                reference.push(ray_attacks(sq, slider, Bitboard(subset)));
                subset = subset.wrapping_sub(mask.0) & mask.0;
                if subset == 0 {
                    break;
                }
            }

            let magic = find_magic(mask, shift, &occupancies, &reference, rng);
            let offset = attacks.len();
            let entry = MagicEntry {
                mask,
                magic,
                shift,
                offset,
            };

            attacks.resize(offset + (1 << bits), Bitboard::EMPTY);
            for (&occ, &att) in occupancies.iter().zip(&reference) {
                attacks[entry.index(Bitboard(occ))] = att;
            }
            entries.push(entry);
        }

        log::trace!(
            "built {:?} magic table: {} attack entries",
            slider,
            attacks.len()
        );

        MagicTable { entries, attacks }
    }

    #[inline]
    pub(crate) fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.attacks[self.entries[sq.index()].index(occupancy)]
    }
}

fn find_magic(
    mask: Bitboard,
    shift: u32,
    occupancies: &[u64],
    reference: &[Bitboard],
    rng: &mut StdRng,
) -> u64 {
    let size = occupancies.len();
    let mut used = vec![Bitboard::EMPTY; size];
    // Which attempt last wrote each slot; avoids clearing `used` per candidate.
    let mut epoch = vec![0u32; size];
    let mut attempt = 0u32;

    loop {
        // Sparse candidates succeed far more often.
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        attempt += 1;
        let mut ok = true;
        for (&occ, &att) in occupancies.iter().zip(reference) {
            let idx = (occ.wrapping_mul(magic) >> shift) as usize;
            if epoch[idx] < attempt {
                epoch[idx] = attempt;
                used[idx] = att;
            } else if used[idx] != att {
                ok = false;
                break;
            }
        }
        if ok {
            return magic;
        }
    }
}
