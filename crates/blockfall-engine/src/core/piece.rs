use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, shape::Shape};

/// 24-bit color stored in grid cells and used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the color cells of this kind are drawn and stored with.
    #[must_use]
    pub const fn color(self) -> Rgb {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::new([[1, 1, 1, 1]]),
    // O-piece
    Shape::new([[1, 1], [1, 1]]),
    // T-piece
    Shape::new([[1, 1, 1], [0, 1, 0]]),
    // L-piece
    Shape::new([[1, 1, 1], [1, 0, 0]]),
    // J-piece
    Shape::new([[1, 1, 1], [0, 0, 1]]),
    // S-piece
    Shape::new([[1, 1, 0], [0, 1, 1]]),
    // Z-piece
    Shape::new([[0, 1, 1], [1, 1, 0]]),
];

const PIECE_COLORS: [Rgb; PieceKind::LEN] = [
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(255, 165, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 0, 0),
];

/// A falling piece: its kind, current orientation and board position.
///
/// `(x, y)` is the board coordinate of the shape's top-left corner. Pieces are
/// plain values; moving or rotating returns a new `Piece` and leaves it to the
/// caller to check the result against a [`Grid`](super::Grid).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::O);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
///
/// let moved = piece.shifted(-1, 2);
/// assert_eq!((moved.x(), moved.y()), (3, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece at the spawn point: top row, horizontally centered.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let x = (BOARD_WIDTH / 2 - shape.width() / 2) as i32;
        Self::at(kind, x, 0)
    }

    /// Creates a piece of `kind` in spawn orientation at `(x, y)`.
    #[must_use]
    pub const fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x,
            y,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.kind.color()
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Board coordinates covered by the piece's occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + offset(dx), self.y + offset(dy)))
    }

    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise around its top-left corner.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn offset(d: usize) -> i32 {
    // shape offsets never exceed MAX_SHAPE_SIZE
    d as i32
}
