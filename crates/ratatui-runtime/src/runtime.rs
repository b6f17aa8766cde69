use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    keyboard_enhancement_requested: bool,
    key_release_events: bool,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame rate (frames per second). `None` stops frame events.
    pub fn set_frame_rate(&mut self, rate: Option<f64>) {
        self.events.set_frame_rate(rate);
    }

    /// Asks the terminal to report key release events.
    ///
    /// Takes effect when called from `App::init()`. Terminals without the
    /// kitty keyboard protocol ignore the request; check
    /// [`key_release_events`](Self::key_release_events) once running.
    pub fn enable_keyboard_enhancement(&mut self) {
        self.keyboard_enhancement_requested = true;
    }

    /// Returns whether the terminal reports key release events.
    #[must_use]
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Enables keyboard enhancement if requested and supported
    /// 3. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Frame`: calls `app.update()` then `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            if self.keyboard_enhancement_requested && terminal::supports_keyboard_enhancement()? {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
                self.key_release_events = true;
            }

            let result = self.run_loop(app, terminal);

            if self.key_release_events {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn run_loop<A>(&mut self, app: &mut A, terminal: &mut DefaultTerminal) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Frame => {
                    app.update(self);
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}
