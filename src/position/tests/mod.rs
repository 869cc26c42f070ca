//! Position tests.
//!
//! - `perft.rs` - move counts against known reference positions
//! - `draw.rs` - game status: fifty-move rule, repetition, insufficient material
//! - `make_unmake.rs` - make/undo restores every field
//! - `edge_cases.rs` - special moves and terminal positions
//! - `proptest.rs` - property-based tests over random playouts

mod make_unmake;
mod perft;
mod proptest;
