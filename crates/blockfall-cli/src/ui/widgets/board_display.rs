use blockfall_engine::{GameSession, render};
use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, TerminalCanvas};

/// The playfield: settled cells, falling piece and score, drawn through the
/// engine's render protocol.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
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
        CANVAS_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        CANVAS_HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let area = Rect {
            width: area.width.min(CANVAS_WIDTH),
            height: area.height.min(CANVAS_HEIGHT),
            ..area
        };
        render::render_session(self.session, &mut TerminalCanvas::new(buf, area));
    }
}
