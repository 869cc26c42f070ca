//! Error types for malformed input.
//!
//! Invariant violations inside the engine (undo with no history, a
//! zero-capacity transposition table) panic instead; game-over conditions are
//! ordinary values (`GameStatus`).

use thiserror::Error;

use crate::types::{Color, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    #[error("FEN must have at least 4 parts, found {found}")]
    TooFewParts { found: usize },

    /// Invalid piece character in position string
    #[error("Invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },

    /// Invalid castling character
    #[error("Invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },

    /// Invalid side to move (must be 'w' or 'b')
    #[error("Invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },

    /// Invalid en passant square
    #[error("Invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },

    /// En passant target with no enemy pawn behind it
    #[error("En passant square {square} has no pawn that just double-pushed")]
    EnPassantWithoutPawn { square: Square },

    /// Pawn placed on the first or eighth rank
    #[error("Pawn on back rank at {square}")]
    PawnOnBackRank { square: Square },

    /// Placement field does not describe exactly 8 ranks
    #[error("FEN placement must have 8 ranks, found {found}")]
    WrongRankCount { found: usize },

    /// A rank describes more or fewer than 8 files
    #[error("Rank {rank} describes {files} files, expected 8")]
    BadFileCount { rank: usize, files: usize },

    /// Half-move clock or full-move number is not a number
    #[error("Invalid move counter '{found}'")]
    InvalidCounter { found: String },

    /// Each side needs exactly one king
    #[error("{color} has {count} kings, expected exactly 1")]
    InvalidKingCount { color: Color, count: u32 },
}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    #[error("Move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },

    /// Invalid square notation in move
    #[error("Invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },

    /// Invalid promotion piece
    #[error("Invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },

    /// Move is not legal in the current position
    #[error("Illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    #[error("Rank {rank} out of bounds (must be 0-7)")]
    RankOutOfBounds { rank: usize },

    /// File out of bounds (must be 0-7)
    #[error("File {file} out of bounds (must be 0-7)")]
    FileOutOfBounds { file: usize },

    /// Invalid algebraic notation
    #[error("Invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}
