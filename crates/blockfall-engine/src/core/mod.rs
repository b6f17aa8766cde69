//! Board and piece data model.
//!
//! - [`Grid`] - Fixed 10×20 cell storage with collision, merge and line clearing
//! - [`Piece`] - Falling piece: kind, occupancy [`Shape`] and board position
//! - [`PieceKind`] - The seven canonical tetrominoes with their shapes and colors

pub use self::{grid::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of cell columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of cell rows on the board.
pub const BOARD_HEIGHT: usize = 20;
