//! Drawing protocol between the game state and a display backend.
//!
//! Geometry is expressed in pixels of a 300×600 viewport: each board cell is
//! a 30-pixel square drawn 29 pixels wide, leaving a one-pixel gap. Backends
//! implement [`Renderer`] and scale as they need.

use crate::{BOARD_HEIGHT, BOARD_WIDTH, GameSession, Grid, Piece, Rgb};

/// Pixel pitch of one board cell.
pub const CELL_SIZE: u32 = 30;
/// Drawn size of one board cell.
pub const CELL_DRAW_SIZE: u32 = CELL_SIZE - 1;
#[expect(clippy::cast_possible_truncation)]
pub const VIEWPORT_WIDTH: u32 = CELL_SIZE * BOARD_WIDTH as u32;
#[expect(clippy::cast_possible_truncation)]
pub const VIEWPORT_HEIGHT: u32 = CELL_SIZE * BOARD_HEIGHT as u32;
/// Distance of the score text from the top and right viewport edges.
pub const SCORE_PADDING: u32 = 10;
/// Target display rate.
pub const TARGET_FPS: u32 = 60;

pub const BACKGROUND_COLOR: Rgb = Rgb::BLACK;
pub const SCORE_COLOR: Rgb = Rgb::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Rectangle drawn for the board cell at `column`, `row`.
    #[must_use]
    pub fn cell(column: u32, row: u32) -> Self {
        Self {
            x: column * CELL_SIZE,
            y: row * CELL_SIZE,
            width: CELL_DRAW_SIZE,
            height: CELL_DRAW_SIZE,
        }
    }
}

/// Point text is aligned to: its top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAnchor {
    pub right: u32,
    pub top: u32,
}

/// Display backend.
pub trait Renderer {
    /// Fills the whole viewport with `color`.
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);

    /// Draws `text` so its bounding box's top-right corner sits at `anchor`.
    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Rgb);
}

/// Draws a full frame: background, settled cells, falling piece, score.
pub fn render_session<R>(session: &GameSession, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    renderer.clear(BACKGROUND_COLOR);
    render_grid(session.grid(), renderer);
    render_piece(session.falling_piece(), renderer);
    render_score(session.score(), renderer);
}

pub fn render_grid<R>(grid: &Grid, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    for (row, cells) in (0..).zip(grid.rows()) {
        for (column, cell) in (0..).zip(cells) {
            if let Some(color) = cell.color() {
                renderer.fill_rect(PixelRect::cell(column, row), color);
            }
        }
    }
}

pub fn render_piece<R>(piece: &Piece, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    for (x, y) in piece.occupied_positions() {
        let (Ok(column), Ok(row)) = (u32::try_from(x), u32::try_from(y)) else {
            continue;
        };
        renderer.fill_rect(PixelRect::cell(column, row), piece.color());
    }
}

pub fn render_score<R>(score: usize, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    let anchor = TextAnchor {
        right: VIEWPORT_WIDTH - SCORE_PADDING,
        top: SCORE_PADDING,
    };
    renderer.draw_text(&format!("Score: {score}"), anchor, SCORE_COLOR);
}
