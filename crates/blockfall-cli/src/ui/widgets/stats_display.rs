use std::fmt::Display;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use crate::ui::widgets::style;

const CONTENT_WIDTH: u16 = 20;

/// Names of single to four-line clears, in that order.
const CLEAR_NAMES: [&str; 4] = ["SINGLES", "DOUBLES", "TRIPLES", "QUADS"];

/// Score, line clear tallies, resets and the piece seed of a session.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        CONTENT_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let session = self.session;
        let stats = session.stats();

        let mut lines = vec![
            Line::from("SCORE:"),
            Line::from(session.score().to_string()).right_aligned(),
            Line::default(),
            field("LINES", stats.total_cleared_lines()),
            field("PIECES", stats.completed_pieces()),
            Line::default(),
        ];
        lines.extend(
            CLEAR_NAMES
                .iter()
                .zip(&stats.line_cleared_counter()[1..])
                .map(|(name, count)| field(name, count)),
        );
        lines.extend([
            Line::default(),
            field("RESETS", session.game_overs()),
            Line::from("SEED:"),
            Line::from(session.seed().to_string()).right_aligned(),
        ]);
        lines
    }
}

/// `label` flush left, `value` flush right across the panel.
fn field(label: &str, value: impl Display) -> Line<'static> {
    let pad = usize::from(CONTENT_WIDTH).saturating_sub(label.len() + 1);
    Line::from(format!("{label}:{value:>pad$}"))
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut paragraph = Paragraph::new(Text::from(self.lines())).style(style::DEFAULT);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{
        BOARD_HEIGHT, BOARD_WIDTH, Cell, GameConfig, Grid, Piece, PieceKind, PieceSeed,
    };

    use super::*;

    fn line_texts(display: &StatsDisplay<'_>) -> Vec<String> {
        display.lines().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fields_span_the_panel() {
        assert_eq!(field("LINES", 7).to_string(), "LINES:             7");
        assert_eq!(field("QUADS", 1234).to_string(), "QUADS:          1234");
    }

    #[test]
    fn test_single_clear_is_tallied() {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        rows[BOARD_HEIGHT - 1] = [Cell::Filled(PieceKind::L); BOARD_WIDTH];
        for cell in &mut rows[BOARD_HEIGHT - 1][3..7] {
            *cell = Cell::Empty;
        }
        let mut session = GameSession::from_parts(
            GameConfig::default(),
            Grid::from_rows(rows),
            Piece::at(PieceKind::I, 3, 0),
            PieceSeed::from(77),
        );
        _ = session.hard_drop_and_lock();

        let display = StatsDisplay::new(&session);
        let texts = line_texts(&display);
        assert_eq!(texts.len(), 14);
        assert_eq!(texts[1], session.score().to_string());
        assert_eq!(texts[3], "LINES:             1");
        assert_eq!(texts[4], "PIECES:            1");
        assert_eq!(texts[6], "SINGLES:           1");
        assert_eq!(texts[7], "DOUBLES:           0");
        assert_eq!(texts[13], "77");
    }

    #[test]
    fn test_block_adds_margins() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from(1));
        let display = StatsDisplay::new(&session).block(BlockWidget::bordered());
        assert_eq!(display.width(), CONTENT_WIDTH + 2);
        assert_eq!(display.height(), 14 + 2);

        let mut buf = Buffer::empty(Rect::new(0, 0, display.width(), display.height()));
        display.render(buf.area, &mut buf);
        let row: String = (0..buf.area.width)
            .map(|x| buf[(x, 4)].symbol().to_owned())
            .collect();
        assert_eq!(row, "│LINES:             0│");
    }
}
