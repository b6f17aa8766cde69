use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Frame deadline reached: update, then draw.
    Frame,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
