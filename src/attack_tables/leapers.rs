//! Attack tables for leaper pieces (knights, kings, pawns).

use crate::types::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        table[sq.index()] = deltas
            .iter()
            .filter_map(|&(dr, df)| sq.offset(dr, df))
            .fold(Bitboard::EMPTY, |acc, target| {
                acc | Bitboard::from_square(target)
            });
    }
    table
}

pub(super) fn knight_table() -> [Bitboard; 64] {
    leaper_table(&KNIGHT_DELTAS)
}

pub(super) fn king_table() -> [Bitboard; 64] {
    leaper_table(&KING_DELTAS)
}

/// Squares attacked by a pawn of each color, indexed `[color][square]`.
pub(super) fn pawn_tables() -> [[Bitboard; 64]; 2] {
    let mut tables = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let forward = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        tables[color.index()] = leaper_table(&[(forward, -1), (forward, 1)]);
    }
    tables
}
