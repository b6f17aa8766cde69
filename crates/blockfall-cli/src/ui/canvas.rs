use blockfall_engine::{
    Rgb,
    render::{CELL_SIZE, PixelRect, Renderer, TextAnchor, VIEWPORT_HEIGHT, VIEWPORT_WIDTH},
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

/// Terminal columns per board cell, so cells look roughly square.
pub const COLUMNS_PER_CELL: u32 = 2;

/// Size of the whole viewport in terminal cells.
#[expect(clippy::cast_possible_truncation)]
pub const CANVAS_WIDTH: u16 = (VIEWPORT_WIDTH / CELL_SIZE * COLUMNS_PER_CELL) as u16;
#[expect(clippy::cast_possible_truncation)]
pub const CANVAS_HEIGHT: u16 = (VIEWPORT_HEIGHT / CELL_SIZE) as u16;

/// Terminal column of the left edge of the board cell containing pixel `x`.
fn column(x: u32) -> u32 {
    x / CELL_SIZE * COLUMNS_PER_CELL
}

fn row(y: u32) -> u32 {
    y / CELL_SIZE
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// [`Renderer`] drawing into a ratatui buffer.
///
/// One board cell becomes two columns by one row of terminal cells. Pixel
/// coordinates are scaled down, so the one-pixel gap between cells is lost.
#[derive(Debug)]
pub struct TerminalCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    fn position(&self, column: u32, row: u32) -> Option<Position> {
        let x = self.area.x.checked_add(u16::try_from(column).ok()?)?;
        let y = self.area.y.checked_add(u16::try_from(row).ok()?)?;
        let position = Position::new(x, y);
        self.area.contains(position).then_some(position)
    }
}

impl Renderer for TerminalCanvas<'_> {
    fn clear(&mut self, color: Rgb) {
        let style = Style::new().bg(to_color(color));
        self.buf.set_style(self.area, style);
        for position in self.area.positions() {
            self.buf[position].set_symbol(" ");
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let first_column = column(rect.x);
        let last_column = column(rect.x + rect.width - 1) + COLUMNS_PER_CELL - 1;
        let first_row = row(rect.y);
        let last_row = row(rect.y + rect.height - 1);

        let style = Style::new().bg(to_color(color));
        for y in first_row..=last_row {
            for x in first_column..=last_column {
                if let Some(position) = self.position(x, y) {
                    self.buf[position].set_symbol(" ").set_style(style);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Rgb) {
        let Ok(width) = u32::try_from(text.chars().count()) else {
            return;
        };
        let right = anchor.right * COLUMNS_PER_CELL / CELL_SIZE;
        let left = right.saturating_sub(width);
        let top = row(anchor.top);
        // Characters that do not fit left of the viewport are dropped.
        let hidden = (width - (right - left)) as usize;

        let style = Style::new().fg(to_color(color));
        for (column, ch) in (left..).zip(text.chars().skip(hidden)) {
            if let Some(position) = self.position(column, top) {
                self.buf[position].set_char(ch).set_style(style);
            }
        }
    }
}
