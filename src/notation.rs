//! FEN import/export and long-algebraic move parsing.

use std::str::FromStr;

use crate::attack_tables::AttackTables;
use crate::error::{FenError, MoveParseError};
use crate::position::Position;
use crate::types::{
    Bitboard, CastlingRights, Color, Move, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q,
};
use crate::zobrist::ZobristKeys;

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN, using the process-wide tables.
    ///
    /// The move counters are optional and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with(fen, AttackTables::global(), ZobristKeys::global())
    }

    /// Parse a position from FEN, binding it to the given tables.
    pub fn from_fen_with(
        fen: &str,
        attacks: &'static AttackTables,
        zobrist: &'static ZobristKeys,
    ) -> Result<Self, FenError> {
        let mut pos = Position::empty_with(attacks, zobrist);
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(rank, file as u8).ok_or(FenError::BadFileCount {
                    rank: rank_idx,
                    files: file + 1,
                })?;
                pos.set_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadFileCount {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let count = pos.pieces(color, Piece::King).popcount();
            if count != 1 {
                return Err(FenError::InvalidKingCount { color, count });
            }
        }

        for color in Color::BOTH {
            let stray = pos.pieces(color, Piece::Pawn) & (Bitboard::RANK_1 | Bitboard::RANK_8);
            if let Some(square) = stray.lsb() {
                return Err(FenError::PawnOnBackRank { square });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut rights = 0u8;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                rights |= match c {
                    'K' => CASTLE_WHITE_K,
                    'Q' => CASTLE_WHITE_Q,
                    'k' => CASTLE_BLACK_K,
                    'q' => CASTLE_BLACK_Q,
                    _ => return Err(FenError::InvalidCastling { char: c }),
                };
            }
        }
        pos.castling = CastlingRights::from_u8(rights);

        pos.en_passant = match parts[3] {
            "-" => None,
            text => {
                let invalid = || FenError::InvalidEnPassant {
                    found: text.to_string(),
                };
                let sq = Square::from_str(text).map_err(|_| invalid())?;
                // The target sits behind a pawn the opponent just double-pushed
                let (target_rank, behind) = match pos.side_to_move {
                    Color::White => (5, -1),
                    Color::Black => (2, 1),
                };
                if sq.rank() != target_rank {
                    return Err(invalid());
                }
                let them = pos.side_to_move.opponent();
                let pushed = sq
                    .offset(behind, 0)
                    .is_some_and(|victim| pos.pieces(them, Piece::Pawn).contains(victim));
                if !pushed {
                    return Err(FenError::EnPassantWithoutPawn { square: sq });
                }
                Some(sq)
            }
        };

        let counter = |text: &str| {
            text.parse::<u32>().map_err(|_| FenError::InvalidCounter {
                found: text.to_string(),
            })
        };
        if let Some(text) = parts.get(4) {
            pos.halfmove_clock = counter(text)?;
        }
        if let Some(text) = parts.get(5) {
            pos.fullmove_number = counter(text)?.max(1);
        }

        pos.hash = pos.compute_hash();
        Ok(pos)
    }

    /// Six-field FEN of the current position.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        };

        let rights = self.castling_rights();
        let mut castling: String = [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ]
        .iter()
        .filter(|&&(color, kingside, _)| rights.has(color, kingside))
        .map(|&(_, _, c)| c)
        .collect();
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Parse a move in long algebraic notation (`e2e4`, `e7e8q`).
    ///
    /// Returns the matching legal move, carrying its full metadata.
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from = Square::from_str(&text[0..2]).map_err(|_| invalid_square())?;
        let to = Square::from_str(&text[2..4]).map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_legal()
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse and play a sequence of long-algebraic moves.
    pub fn play_moves<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MoveParseError> {
        for text in moves {
            let mv = self.parse_move(text)?;
            self.make_move(mv);
        }
        Ok(())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
