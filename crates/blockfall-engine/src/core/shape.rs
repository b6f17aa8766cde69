use std::fmt::{self, Write as _};

/// Largest extent of a shape along either axis.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Rectangular occupancy matrix of a piece.
///
/// Cells are stored row-major in a fixed 4×4 buffer; only the top-left
/// `width × height` region is meaningful; the rest is always empty.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let t = Shape::new([[1, 1, 1], [0, 1, 0]]);
/// let rotated = t.rotated();
///
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(rotated, Shape::new([[0, 1], [1, 1], [0, 1]]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) if either dimension is zero or
    /// exceeds [`MAX_SHAPE_SIZE`].
    #[must_use]
    pub const fn new<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W,
            height: H,
            cells,
        }
    }

    /// Builds a `width × height` shape by asking `f(x, y)` for every cell.
    ///
    /// Returns `None` when a dimension is zero or larger than [`MAX_SHAPE_SIZE`].
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Option<Self> {
        let valid = 1..=MAX_SHAPE_SIZE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return None;
        }
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(height) {
            for (x, cell) in row.iter_mut().enumerate().take(width) {
                *cell = f(x, y);
            }
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Cells outside the shape's dimensions are empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Iterates the `(x, y)` offsets of occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// Row `x` of the result is column `x` of `self` read bottom-to-top, so the
    /// dimensions are transposed.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut new_y = 0;
        while new_y < self.width {
            let mut new_x = 0;
            while new_x < self.height {
                cells[new_y][new_x] = self.cells[self.height - 1 - new_x][new_y];
                new_x += 1;
            }
            new_y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                f.write_char(if self.cells[y][x] { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({}x{}, \"", self.width, self.height)?;
        for y in 0..self.height {
            if y > 0 {
                f.write_char('/')?;
            }
            for x in 0..self.width {
                f.write_char(if self.cells[y][x] { '#' } else { '.' })?;
            }
        }
        f.write_str("\")")
    }
}
