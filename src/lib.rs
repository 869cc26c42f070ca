pub mod attack_tables;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;
pub mod zobrist;

pub use attack_tables::{AttackTables, Slider};
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{Evaluator, MaterialEvaluator};
pub use notation::START_FEN;
pub use position::{GameStatus, Position, ScopedMove};
pub use search::{
    SearchEngine, SearchInfoCallback, SearchIterationInfo, SearchLimits, SearchParams,
    SearchResult, MATE_VALUE,
};
pub use tt::{BoundType, TranspositionEntry, TranspositionTable};
pub use types::{Bitboard, CastlingRights, Color, Move, MoveKind, MoveList, Piece, Square};
pub use zobrist::ZobristKeys;
