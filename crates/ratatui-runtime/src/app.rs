use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for frame-driven TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`, before the terminal is set
    /// up. Use this to configure the frame rate and keyboard enhancement.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    ///
    /// Events arriving between two frames are delivered before the next
    /// `update()`.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances the application by one frame.
    fn update(&mut self, runtime: &mut Runtime);

    /// Draws the screen. Called right after each `update()`.
    fn draw(&self, frame: &mut Frame);
}
