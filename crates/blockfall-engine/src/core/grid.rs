use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind, Rgb},
};

/// A single board cell.
///
/// An occupied cell remembers the kind of the piece that was locked there,
/// which determines the color it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind.color()),
        }
    }
}

pub type GridRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: GridRow = [Cell::Empty; BOARD_WIDTH];

/// Settled cells of the playfield.
///
/// The grid is always [`BOARD_WIDTH`] × [`BOARD_HEIGHT`]. Row 0 is the top.
/// Cells become occupied only through [`merge`](Self::merge) and are removed
/// only through [`clear_lines`](Self::clear_lines).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::new();
/// let piece = Piece::at(PieceKind::O, 4, 18);
///
/// assert!(grid.is_valid(&piece, 4, 18));
/// assert!(!grid.is_valid(&piece, 4, 19));
///
/// grid.merge(&piece);
/// assert_eq!(grid.occupied_count(), 4);
/// assert_eq!(grid.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Builds a grid from explicit row contents, top row first.
    #[must_use]
    pub const fn from_rows(rows: [GridRow; BOARD_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| cell.is_empty())
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Checks whether `piece`'s shape fits with its top-left corner at `(x, y)`.
    ///
    /// Every occupied shape cell must land inside the board on an empty cell.
    /// The piece's own position is ignored, so this can probe hypothetical
    /// moves and rotations without committing them.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .shape()
            .occupied_cells()
            .all(|(dx, dy)| match board_index(x, dx, y, dy) {
                Some((col, row)) => self.rows[row][col].is_empty(),
                None => false,
            })
    }

    /// Checks `piece` at its current position.
    #[must_use]
    pub fn fits(&self, piece: &Piece) -> bool {
        self.is_valid(piece, piece.x(), piece.y())
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// Performs no collision check; callers establish validity first. Cells
    /// that would fall outside the board are skipped.
    pub fn merge(&mut self, piece: &Piece) {
        for (dx, dy) in piece.shape().occupied_cells() {
            if let Some((col, row)) = board_index(piece.x(), dx, piece.y(), dy) {
                self.rows[row][col] = Cell::Filled(piece.kind());
            }
        }
    }

    /// Returns whether every cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Clears full rows and returns how many were removed.
    ///
    /// Full rows are collected top-to-bottom, then each is removed and an
    /// empty row is inserted at the top. Removing a row only shifts the rows
    /// above it, so the indices collected below it stay correct.
    pub fn clear_lines(&mut self) -> usize {
        let full_rows: ArrayVec<usize, BOARD_HEIGHT> = (0..BOARD_HEIGHT)
            .filter(|&y| self.is_row_full(y))
            .collect();
        for &y in &full_rows {
            self.rows[..=y].rotate_right(1);
            self.rows[0] = EMPTY_ROW;
        }
        full_rows.len()
    }
}

/// Board position of the shape cell `(dx, dy)` of a piece anchored at `(x, y)`.
fn board_index(x: i32, dx: usize, y: i32, dy: usize) -> Option<(usize, usize)> {
    let col = usize::try_from(x.checked_add(i32::try_from(dx).ok()?)?).ok()?;
    let row = usize::try_from(y.checked_add(i32::try_from(dy).ok()?)?).ok()?;
    (col < BOARD_WIDTH && row < BOARD_HEIGHT).then_some((col, row))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(kind) => kind.as_char(),
                };
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}
