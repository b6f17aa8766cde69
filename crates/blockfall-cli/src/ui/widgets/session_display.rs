use blockfall_engine::GameSession;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Board with the statistics panel beside it.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    paused: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            paused: false,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    pub fn height(&self) -> u16 {
        let (board, stats) = self.widgets();
        u16::max(board.height(), stats.height())
    }

    fn widgets(&self) -> (BoardDisplay<'a>, StatsDisplay<'a>) {
        let border_style = if self.paused {
            color::YELLOW
        } else {
            color::WHITE
        };
        let board = BoardDisplay::new(self.session).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        (board, stats)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (board, stats) = self.widgets();
        let board_width = board.width();

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        board.render(board_area, buf);
        stats.render(stats_area, buf);

        if self.paused {
            let block = Block::new().style(style::PAUSED);
            let text = Text::styled("PAUSED", style::PAUSED).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, PieceSeed};

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_shows_score_and_stats() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from(42));
        let display = SessionDisplay::new(&session);
        assert_eq!(display.height(), 22);

        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 22));
        display.render(buf.area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Score: 0"), "{text}");
        assert!(text.contains("STATS"), "{text}");
        assert!(text.contains("42"), "{text}");
        assert!(!text.contains("PAUSED"), "{text}");
    }

    #[test]
    fn test_render_paused_banner() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from(42));
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 22));
        SessionDisplay::new(&session)
            .paused(true)
            .render(buf.area, &mut buf);
        assert!(buffer_text(&buf).contains("PAUSED"));
    }
}
